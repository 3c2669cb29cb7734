use std::fmt;

use thiserror::Error;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    InvalidEmail,
    InvalidDateTime,
    InvalidId,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationReason::Missing => "is required",
            ValidationReason::InvalidEmail => "must be a valid email address",
            ValidationReason::InvalidDateTime => "must be an RFC 3339 date-time",
            ValidationReason::InvalidId => "must be a UUID",
        };
        f.write_str(text)
    }
}

/// The first field of a user payload that failed validation.
///
/// `field` is the attribute name as it appears in JSON and in the store
/// (`firstName`, `dateOfBirth`, ...), so it can be shown to API callers
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("User validation failed: {field} {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}
