//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Status codes are chosen by [`ErrorKind`], so every backend failure that
//! classifies the same way produces the same response.

use super::{ErrorKind, RepositoryError};

/// Status code for a payload that failed user validation.
pub const VALIDATION_ERROR_STATUS: u16 = 400;

/// Maps an [`ErrorKind`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `UniqueConstraintViolation` -> 400 (Bad Request)
/// - `StoreError` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use usercrud_core::storage::{error_kind_to_status_code, ErrorKind};
///
/// assert_eq!(error_kind_to_status_code(ErrorKind::NotFound), 404);
/// ```
pub fn error_kind_to_status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::NotFound => 404,
        ErrorKind::UniqueConstraintViolation => 400,
        ErrorKind::StoreError => 500,
    }
}

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// Same as [`error_kind_to_status_code`] except that a timed out store
/// operation answers 504 (Gateway Timeout).
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::Timeout(_) => 504,
        other => error_kind_to_status_code(other.kind()),
    }
}
