//! # domains
//!
//! Entities, port traits and errors for the movie board.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
