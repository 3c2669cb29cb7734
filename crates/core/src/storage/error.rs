use std::time::Duration;

use thiserror::Error;

/// The closed set of outcomes callers branch on.
///
/// Backend-specific failures are folded into one of these kinds before they
/// leave the repository, so handlers never inspect store-internal types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The targeted record does not exist.
    NotFound,
    /// A write would break a uniqueness constraint (email or id).
    UniqueConstraintViolation,
    /// Any other I/O, connectivity, timeout or serialization failure.
    StoreError,
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} {field} already in use: {value}")]
    UniqueConstraintViolation {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

impl RepositoryError {
    /// Classify this error into the kind callers act on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::UniqueConstraintViolation { .. } => {
                ErrorKind::UniqueConstraintViolation
            }
            RepositoryError::ConnectionFailed(_)
            | RepositoryError::QueryFailed(_)
            | RepositoryError::Serialization(_)
            | RepositoryError::InvalidData(_)
            | RepositoryError::Timeout(_) => ErrorKind::StoreError,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
