use domains::{DomainError, Rank};
use thiserror::Error;

/// Failures surfaced to callers of the service layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("movie not found with rank {0}")]
    MovieNotFound(Rank),

    #[error("unknown user {0}")]
    UnknownUser(String),

    #[error("user name {0} is already taken")]
    NameTaken(String),

    /// Covers both an unknown name and a wrong password.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
