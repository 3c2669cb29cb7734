mod error;
mod timestamps;
mod types;
mod validation;

pub use error::{ValidationError, ValidationReason};
pub use timestamps::{next_last_modified, now};
pub use types::{NewUser, RawUser, User};
pub use validation::ValidationRules;
