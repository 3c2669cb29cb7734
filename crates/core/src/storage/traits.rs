use async_trait::async_trait;
use uuid::Uuid;

use crate::user::User;

use super::Result;

/// Repository for user operations.
///
/// Implementations are the only writers of user records. Each write is an
/// optimistic conditional write whose precondition is documented on the
/// method; a failed precondition is reported as its own error kind.
///
/// Dropping a returned future cancels the operation; no further store
/// requests are issued for it.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID. `Ok(None)` means no such user.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their email address through the email index.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Creates a new user.
    ///
    /// Fails with `UniqueConstraintViolation` when the email belongs to
    /// another user, or when the id is already taken (precondition: key
    /// absent).
    async fn create_user(&self, user: &User) -> Result<User>;

    /// Updates an existing user and returns the stored record.
    ///
    /// `created_at` is kept from the stored record and `last_modified` is
    /// assigned by the repository. Fails with `UniqueConstraintViolation`
    /// when the email belongs to another user and with `NotFound` when the
    /// id does not exist (precondition: key present).
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Deletes a user by their ID (precondition: key present).
    async fn delete_user(&self, id: Uuid) -> Result<()>;
}
