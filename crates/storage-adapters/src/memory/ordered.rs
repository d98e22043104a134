//! Rank-sorted movie sequence with a rank → position index.
//!
//! Positions are always resolved by binary search on rank, never derived from
//! the rank value itself, so sparse or out-of-order ranks behave correctly.

use std::cmp::Ordering;
use std::collections::HashMap;

use domains::{Movie, Rank};
use thiserror::Error;

/// Which neighbor to look for in [`OrderedMovieStore::neighbor_rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Internal signal for a rank that is not in the sequence. Public operations
/// turn it into `None` or an empty result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("rank {0} is not stored")]
struct RankNotFound(Rank);

#[derive(Debug, Default)]
pub struct OrderedMovieStore {
    /// Sorted by rank; equal ranks keep insertion order.
    movies: Vec<Movie>,
    /// Rank → position in `movies`. On a duplicate rank the latest insert wins.
    rank_index: HashMap<Rank, usize>,
}

impl OrderedMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after any entries of equal rank and re-points the index.
    pub fn insert(&mut self, movie: Movie) {
        let position = self
            .movies
            .partition_point(|stored| stored.rank_order(&movie) != Ordering::Greater);

        if position < self.movies.len() {
            for slot in self.rank_index.values_mut() {
                if *slot >= position {
                    *slot += 1;
                }
            }
        }

        self.rank_index.insert(movie.rank(), position);
        self.movies.insert(position, movie);
    }

    pub fn get_by_rank(&self, rank: Rank) -> Option<&Movie> {
        self.rank_index
            .get(&rank)
            .and_then(|&position| self.movies.get(position))
    }

    pub fn get_by_rank_mut(&mut self, rank: Rank) -> Option<&mut Movie> {
        let position = *self.rank_index.get(&rank)?;
        self.movies.get_mut(position)
    }

    pub fn all(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn first(&self) -> Option<&Movie> {
        self.movies.first()
    }

    pub fn last(&self) -> Option<&Movie> {
        self.movies.last()
    }

    /// All movies with exactly `rank`. Matches are contiguous, so the scan
    /// stops at the first mismatch.
    pub fn get_range_by_rank(&self, rank: Rank) -> Vec<&Movie> {
        match self.position_of(rank) {
            Ok(start) => self.movies[start..]
                .iter()
                .take_while(|movie| movie.rank() == rank)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Nearest stored rank strictly before or after `movie`'s rank. `None` at
    /// either boundary or when the movie's rank is not stored.
    pub fn neighbor_rank(&self, movie: &Movie, direction: Direction) -> Option<Rank> {
        let rank = movie.rank();
        let start = self.position_of(rank).ok()?;

        match direction {
            Direction::Previous => self.movies[..start]
                .iter()
                .rev()
                .map(Movie::rank)
                .find(|&stored| stored < rank),
            Direction::Next => self.movies[start..]
                .iter()
                .map(Movie::rank)
                .find(|&stored| stored > rank),
        }
    }

    /// Lower-bound binary search for the first entry with `rank`.
    fn position_of(&self, rank: Rank) -> Result<usize, RankNotFound> {
        let position = self.movies.partition_point(|stored| stored.rank() < rank);
        match self.movies.get(position) {
            Some(stored) if stored.rank() == rank => Ok(position),
            _ => Err(RankNotFound(rank)),
        }
    }
}
