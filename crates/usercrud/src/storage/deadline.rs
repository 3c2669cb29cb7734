//! Deadline repository decorator.
//!
//! Wraps a `UserRepository` so that every call, including the whole
//! read-check-write sequence of create and update, must finish within a
//! fixed budget. When the budget runs out the inner future is dropped, which
//! cancels any in-flight store request and prevents the remaining steps
//! from running.
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = DeadlineRepository::new(Arc::new(InMemoryRepository::new()), Duration::from_millis(200));
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use usercrud_core::storage::{RepositoryError, Result, UserRepository};
use usercrud_core::user::User;

/// Repository decorator that bounds each operation with a timeout.
pub struct DeadlineRepository<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    timeout: Duration,
}

impl<R> DeadlineRepository<R>
where
    R: UserRepository,
{
    /// Creates a new deadline-bounded repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository
    /// * `timeout` - Budget for each individual operation
    pub fn new(repository: Arc<R>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Repository operation exceeded its deadline"
                );
                Err(RepositoryError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl<R> UserRepository for DeadlineRepository<R>
where
    R: UserRepository + 'static,
{
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.bounded("get_user", self.repository.get_user(id)).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.bounded("get_user_by_email", self.repository.get_user_by_email(email))
            .await
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        self.bounded("create_user", self.repository.create_user(user))
            .await
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        self.bounded("update_user", self.repository.update_user(user))
            .await
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.bounded("delete_user", self.repository.delete_user(id))
            .await
    }
}
