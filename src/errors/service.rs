use thiserror::Error;

use super::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid or missing input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// An invalid, expired or otherwise unverifiable session token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Anything that should not happen during normal operation
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Errors bubbling up from the data access layer
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
