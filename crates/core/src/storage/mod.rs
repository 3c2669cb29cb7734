mod error;
mod http_mapping;
mod traits;
mod uniqueness;

pub use error::{ErrorKind, RepositoryError, Result};
pub use http_mapping::{
    error_kind_to_status_code, repository_error_to_status_code, VALIDATION_ERROR_STATUS,
};
pub use traits::UserRepository;
pub use uniqueness::ensure_email_available;
