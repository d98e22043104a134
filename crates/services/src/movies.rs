//! Movie browsing and comment posting.

use chrono::{NaiveDateTime, Utc};
use domains::{make_comment, MovieFilter, MovieRepository, Rank};
use rand::seq::SliceRandom;

use crate::error::{Result, ServiceError};
use crate::views::{CommentView, MovieView, RankPage};

/// Posts a comment timestamped now.
pub fn add_comment(
    repo: &mut dyn MovieRepository,
    rank: Rank,
    text: &str,
    user_name: &str,
) -> Result<CommentView> {
    add_comment_at(repo, rank, text, user_name, Utc::now().naive_utc())
}

/// Attaches the comment to both the user and the movie, then admits it
/// through the repository's integrity check.
pub fn add_comment_at(
    repo: &mut dyn MovieRepository,
    rank: Rank,
    text: &str,
    user_name: &str,
    timestamp: NaiveDateTime,
) -> Result<CommentView> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ServiceError::Validation("comment text must not be empty".into()));
    }
    if repo.get_movie(rank).is_none() {
        return Err(ServiceError::MovieNotFound(rank));
    }

    let (user, movie) = repo
        .comment_targets_mut(user_name, rank)
        .ok_or_else(|| ServiceError::UnknownUser(user_name.to_string()))?;
    let comment = make_comment(text, user, movie, timestamp);
    let view = CommentView::from(&comment);
    repo.add_comment(comment)?;

    tracing::info!(rank, user = %user_name, "comment added");
    Ok(view)
}

pub fn get_movie(repo: &dyn MovieRepository, rank: Rank) -> Result<MovieView> {
    repo.get_movie(rank)
        .map(MovieView::from)
        .ok_or(ServiceError::MovieNotFound(rank))
}

pub fn get_first_movie(repo: &dyn MovieRepository) -> Option<MovieView> {
    repo.get_first_movie().map(MovieView::from)
}

pub fn get_last_movie(repo: &dyn MovieRepository) -> Option<MovieView> {
    repo.get_last_movie().map(MovieView::from)
}

/// Movies at `rank` with neighbor links taken from the first of them. An
/// unknown rank yields an empty page with no links.
pub fn get_movies_by_rank(repo: &dyn MovieRepository, rank: Rank) -> RankPage {
    let movies = repo.get_movies_at_rank(rank);
    let Some(first) = movies.first() else {
        tracing::debug!(rank, "no movies at rank");
        return RankPage::default();
    };

    RankPage {
        prev_rank: repo.get_previous_rank(first),
        next_rank: repo.get_next_rank(first),
        movies: movies.iter().copied().map(MovieView::from).collect(),
    }
}

pub fn get_comments_for_movie(repo: &dyn MovieRepository, rank: Rank) -> Result<Vec<CommentView>> {
    let movie = repo
        .get_movie(rank)
        .ok_or(ServiceError::MovieNotFound(rank))?;
    Ok(movie.comments().iter().map(CommentView::from).collect())
}

pub fn filter_movies(repo: &dyn MovieRepository, filter: &MovieFilter) -> Vec<MovieView> {
    repo.get_movies_by(filter)
        .into_iter()
        .map(MovieView::from)
        .collect()
}

pub fn get_genre_names(repo: &dyn MovieRepository) -> Vec<String> {
    repo.get_genres()
        .iter()
        .map(|genre| genre.name().to_string())
        .collect()
}

/// Up to `quantity` distinct movies picked at random, in rank order.
pub fn get_random_movies(repo: &dyn MovieRepository, quantity: usize) -> Vec<MovieView> {
    let movies = repo.get_all_movies();
    let quantity = quantity.min(movies.len());

    let mut picked: Vec<_> = movies
        .choose_multiple(&mut rand::thread_rng(), quantity)
        .collect();
    picked.sort_by(|a, b| a.rank_order(b));
    picked.into_iter().map(MovieView::from).collect()
}
