//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use usercrud_core::storage::{ensure_email_available, RepositoryError, Result, UserRepository};
use usercrud_core::user::{next_last_modified, now, User};

/// In-memory storage backend.
///
/// Create and update hold the write lock across the email check and the
/// write, so unlike the DynamoDB backend this one enforces email uniqueness
/// atomically.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_by_email<'a>(users: &'a HashMap<Uuid, User>, email: &str) -> Option<&'a User> {
    users.values().find(|u| u.email == email)
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(find_by_email(&users, email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;

        ensure_email_available(find_by_email(&users, &user.email), user.id)?;

        if users.contains_key(&user.id) {
            return Err(RepositoryError::UniqueConstraintViolation {
                entity_type: "User",
                field: "id",
                value: user.id.to_string(),
            });
        }

        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, "User created");

        Ok(user.clone())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;

        ensure_email_available(find_by_email(&users, &user.email), user.id)?;

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "User",
                id: user.id.to_string(),
            })?;

        let updated = User {
            created_at: stored.created_at,
            last_modified: next_last_modified(stored.last_modified, now()),
            ..user.clone()
        };
        *stored = updated.clone();
        tracing::debug!(user_id = %user.id, "User updated");

        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "User",
                id: id.to_string(),
            });
        }
        tracing::debug!(user_id = %id, "User deleted");
        Ok(())
    }
}
