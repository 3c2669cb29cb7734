//! Application-level email uniqueness.
//!
//! The store only guarantees uniqueness of the primary key, so the email
//! constraint is a read-then-write: look the email up through the index,
//! then refuse the write if it belongs to someone else. Two concurrent
//! writers can both pass the check before either writes; backends that
//! cannot hold a lock across both steps only enforce this best-effort.

use uuid::Uuid;

use crate::user::User;

use super::RepositoryError;

/// Check the result of an email lookup against the user about to be written.
///
/// Passes when nobody holds the email or when the holder is `candidate_id`
/// itself (an update that keeps its address).
pub fn ensure_email_available(
    existing: Option<&User>,
    candidate_id: Uuid,
) -> Result<(), RepositoryError> {
    match existing {
        Some(holder) if holder.id != candidate_id => {
            Err(RepositoryError::UniqueConstraintViolation {
                entity_type: "User",
                field: "email",
                value: holder.email.clone(),
            })
        }
        _ => Ok(()),
    }
}
