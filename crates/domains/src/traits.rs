//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the services and the binary.

use crate::error::Result;
use crate::models::{Actor, Comment, Director, Genre, Movie, MovieFilter, Rank, User};

/// Data access contract for the catalog, its users and their comments.
///
/// All operations are synchronous and run to completion. Implementations are
/// not expected to be safe for concurrent mutation; callers serialize writes.
pub trait MovieRepository {
    // User Operations
    fn add_user(&mut self, user: User);
    /// Looks a user up by name. The name is normalized before matching.
    fn get_user(&self, user_name: &str) -> Option<&User>;
    fn get_user_mut(&mut self, user_name: &str) -> Option<&mut User>;

    // Movie Operations
    fn add_movie(&mut self, movie: Movie);
    fn get_movie(&self, rank: Rank) -> Option<&Movie>;
    fn get_movie_mut(&mut self, rank: Rank) -> Option<&mut Movie>;
    /// Every movie, sorted by rank.
    fn get_all_movies(&self) -> &[Movie];
    /// All movies whose rank is exactly `rank`, in insertion order. Empty on a miss.
    fn get_movies_at_rank(&self, rank: Rank) -> Vec<&Movie>;
    fn get_movie_count(&self) -> usize;
    fn get_first_movie(&self) -> Option<&Movie>;
    fn get_last_movie(&self) -> Option<&Movie>;
    /// Movies matching the filter, in rank order.
    fn get_movies_by(&self, filter: &MovieFilter) -> Vec<&Movie>;

    fn get_movies_by_genre(&self, genre: &Genre) -> Vec<&Movie> {
        self.get_movies_by(&MovieFilter::ByGenre(genre.clone()))
    }

    fn get_movies_by_actor(&self, actor: &Actor) -> Vec<&Movie> {
        self.get_movies_by(&MovieFilter::ByActor(actor.clone()))
    }

    fn get_movies_by_director(&self, director: &Director) -> Vec<&Movie> {
        self.get_movies_by(&MovieFilter::ByDirector(director.clone()))
    }

    /// Nearest stored rank strictly below the movie's rank.
    fn get_previous_rank(&self, movie: &Movie) -> Option<Rank>;
    /// Nearest stored rank strictly above the movie's rank.
    fn get_next_rank(&self, movie: &Movie) -> Option<Rank>;

    // Registry Operations
    fn add_actor(&mut self, actor: Actor);
    fn get_actors(&self) -> &[Actor];
    fn add_director(&mut self, director: Director);
    fn get_directors(&self) -> &[Director];
    fn add_genre(&mut self, genre: Genre);
    fn get_genres(&self) -> &[Genre];

    // Comment Operations

    /// Admits a comment into the global log.
    ///
    /// Fails with [`DomainError::Integrity`](crate::DomainError::Integrity)
    /// unless the comment is already present in both its user's and its
    /// movie's comment lists. Never repairs the linkage.
    fn add_comment(&mut self, comment: Comment) -> Result<()>;
    fn get_comments(&self) -> &[Comment];

    /// Mutable access to a user and a movie at once, for two-sided comment
    /// attachment via [`make_comment`](crate::make_comment).
    fn comment_targets_mut(&mut self, user_name: &str, rank: Rank)
        -> Option<(&mut User, &mut Movie)>;
}

/// Password hashing contract. Plaintext never reaches the repository.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces a self-describing hash string (algorithm, salt, digest).
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Checks a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
