//! # services
//!
//! Application logic on top of the `MovieRepository` port. Every function
//! takes the repository explicitly; there is no process-wide handle.

pub mod error;
pub mod movies;
pub mod users;
pub mod views;

pub use error::{Result, ServiceError};
pub use views::{CommentView, MovieView, RankPage};
