//! # storage-adapters
//!
//! Adapters behind the `MovieRepository` port: the in-memory repository and
//! the CSV bulk loader that fills it at startup.

pub mod import;
pub mod memory;

pub use import::{populate, LoadError, LoadSummary};
pub use memory::MemoryMovieRepository;
