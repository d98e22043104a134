//! # DomainError
//!
//! Failures raised by the entity model and the repository port.
//! Lookups that miss are never errors; they return `None` or an empty `Vec`.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A comment was offered to the repository without being linked to both
    /// its user and its movie. The repository is left unmodified.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// A value was rejected by an entity setter (e.g. negative duration)
    #[error("validation error: {0}")]
    Validation(String),

    /// Collaborator failure (e.g. password hashing backend)
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
