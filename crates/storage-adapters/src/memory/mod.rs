//! # In-memory MovieRepository
//!
//! Composes the ordered movie store, the entity registries, a user store and
//! the global comment log behind the `MovieRepository` port.
//!
//! # Developer Note
//! Nothing here is synchronized. The binary owns one instance and every
//! write goes through `&mut self`; sharing across threads needs an outer lock.

mod ordered;
mod registry;

pub use ordered::{Direction, OrderedMovieStore};
pub use registry::Registry;

use std::collections::HashMap;

use domains::{
    Actor, Comment, Director, DomainError, Genre, Movie, MovieFilter, MovieRepository, Rank,
    Result, User,
};

#[derive(Debug, Default)]
pub struct MemoryMovieRepository {
    movies: OrderedMovieStore,
    /// Append-only; duplicate names are the caller's concern.
    users: Vec<User>,
    /// Normalized name → position of the first user registered under it.
    user_index: HashMap<String, usize>,
    actors: Registry<Actor>,
    directors: Registry<Director>,
    genres: Registry<Genre>,
    comments: Vec<Comment>,
}

impl MemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_position(&self, user_name: &str) -> Option<usize> {
        self.user_index.get(&User::normalize_name(user_name)).copied()
    }

    /// The user named by the comment, provided it lists the comment.
    fn linked_user(&self, comment: &Comment) -> Option<&User> {
        comment
            .user_name()
            .and_then(|name| self.get_user(name))
            .filter(|user| user.comments().contains(comment))
    }

    /// The movie named by the comment, provided it lists the comment.
    fn linked_movie(&self, comment: &Comment) -> Option<&Movie> {
        comment
            .movie_rank()
            .and_then(|rank| self.movies.get_by_rank(rank))
            .filter(|movie| movie.comments().contains(comment))
    }
}

impl MovieRepository for MemoryMovieRepository {
    fn add_user(&mut self, user: User) {
        self.user_index
            .entry(user.user_name().to_string())
            .or_insert(self.users.len());
        self.users.push(user);
    }

    fn get_user(&self, user_name: &str) -> Option<&User> {
        self.user_position(user_name)
            .and_then(|position| self.users.get(position))
    }

    fn get_user_mut(&mut self, user_name: &str) -> Option<&mut User> {
        let position = self.user_position(user_name)?;
        self.users.get_mut(position)
    }

    fn add_movie(&mut self, movie: Movie) {
        self.movies.insert(movie);
    }

    fn get_movie(&self, rank: Rank) -> Option<&Movie> {
        self.movies.get_by_rank(rank)
    }

    fn get_movie_mut(&mut self, rank: Rank) -> Option<&mut Movie> {
        self.movies.get_by_rank_mut(rank)
    }

    fn get_all_movies(&self) -> &[Movie] {
        self.movies.all()
    }

    fn get_movies_at_rank(&self, rank: Rank) -> Vec<&Movie> {
        self.movies.get_range_by_rank(rank)
    }

    fn get_movie_count(&self) -> usize {
        self.movies.len()
    }

    fn get_first_movie(&self) -> Option<&Movie> {
        self.movies.first()
    }

    fn get_last_movie(&self) -> Option<&Movie> {
        self.movies.last()
    }

    /// Linear scan in rank order.
    fn get_movies_by(&self, filter: &MovieFilter) -> Vec<&Movie> {
        self.movies
            .all()
            .iter()
            .filter(|movie| filter.matches(movie))
            .collect()
    }

    fn get_previous_rank(&self, movie: &Movie) -> Option<Rank> {
        self.movies.neighbor_rank(movie, Direction::Previous)
    }

    fn get_next_rank(&self, movie: &Movie) -> Option<Rank> {
        self.movies.neighbor_rank(movie, Direction::Next)
    }

    fn add_actor(&mut self, actor: Actor) {
        self.actors.add(actor);
    }

    fn get_actors(&self) -> &[Actor] {
        self.actors.as_slice()
    }

    fn add_director(&mut self, director: Director) {
        self.directors.add(director);
    }

    fn get_directors(&self) -> &[Director] {
        self.directors.as_slice()
    }

    fn add_genre(&mut self, genre: Genre) {
        self.genres.add(genre);
    }

    fn get_genres(&self) -> &[Genre] {
        self.genres.as_slice()
    }

    /// Verifies both back-references before touching the log.
    fn add_comment(&mut self, comment: Comment) -> Result<()> {
        if self.linked_user(&comment).is_none() {
            return Err(DomainError::Integrity(
                "comment not correctly attached to a user".into(),
            ));
        }
        if self.linked_movie(&comment).is_none() {
            return Err(DomainError::Integrity(
                "comment not correctly attached to a movie".into(),
            ));
        }

        self.comments.push(comment);
        Ok(())
    }

    fn get_comments(&self) -> &[Comment] {
        &self.comments
    }

    fn comment_targets_mut(
        &mut self,
        user_name: &str,
        rank: Rank,
    ) -> Option<(&mut User, &mut Movie)> {
        let position = self.user_position(user_name)?;
        let user = self.users.get_mut(position)?;
        let movie = self.movies.get_by_rank_mut(rank)?;
        Some((user, movie))
    }
}
