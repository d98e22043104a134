//! Serializable projections handed to presentation code.

use chrono::NaiveDateTime;
use domains::{Comment, Movie, Rank};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub user_name: Option<String>,
    pub movie_rank: Option<Rank>,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            user_name: comment.user_name().map(str::to_string),
            movie_rank: comment.movie_rank(),
            text: comment.text().to_string(),
            timestamp: comment.timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    pub rank: Rank,
    pub title: String,
    pub year: i32,
    pub description: Option<String>,
    pub director: Option<String>,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub duration: u32,
    pub rating: f32,
    pub votes: u64,
    pub revenue: Option<f64>,
    pub metascore: Option<u8>,
    pub comments: Vec<CommentView>,
}

impl From<&Movie> for MovieView {
    fn from(movie: &Movie) -> Self {
        Self {
            rank: movie.rank(),
            title: movie.title().to_string(),
            year: movie.year(),
            description: movie.description().map(str::to_string),
            director: movie.director().map(|d| d.name().to_string()),
            actors: movie.actors().iter().map(|a| a.name().to_string()).collect(),
            genres: movie.genres().iter().map(|g| g.name().to_string()).collect(),
            duration: movie.duration(),
            rating: movie.rating(),
            votes: movie.votes(),
            revenue: movie.revenue(),
            metascore: movie.metascore(),
            comments: movie.comments().iter().map(CommentView::from).collect(),
        }
    }
}

/// One page of the rank browser: the movies at a rank plus the ranks to
/// link to for "previous" and "next".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankPage {
    pub movies: Vec<MovieView>,
    pub prev_rank: Option<Rank>,
    pub next_rank: Option<Rank>,
}
