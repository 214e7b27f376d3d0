//! Error types for repository operations.

use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Data not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The item is locked by another editing session.
    #[error("Locked: {0}")]
    Locked(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<String> for RepositoryError {
    fn from(msg: String) -> Self {
        RepositoryError::InternalError(msg)
    }
}

impl From<&str> for RepositoryError {
    fn from(msg: &str) -> Self {
        RepositoryError::InternalError(msg.to_string())
    }
}
