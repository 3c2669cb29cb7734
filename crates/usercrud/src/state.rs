//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The storage backend is chosen by feature flag and is
//! always wrapped in a [`DeadlineRepository`] so every operation honors the
//! configured request timeout.

use std::sync::Arc;

use usercrud_core::storage::UserRepository;
use usercrud_core::user::ValidationRules;

use crate::config::Config;
use crate::storage::DeadlineRepository;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// User repository (deadline-bounded, wraps underlying storage).
    pub user_repo: Arc<dyn UserRepository>,
    /// Rules applied to every incoming user payload.
    pub rules: Arc<ValidationRules>,
}

impl AppState {
    /// Creates a new AppState around the given storage backend.
    fn build<R>(repository: Arc<R>, config: &Config) -> Result<Self, anyhow::Error>
    where
        R: UserRepository + 'static,
    {
        let rules = ValidationRules::new()?;

        Ok(Self {
            user_repo: Arc::new(DeadlineRepository::new(
                repository,
                config.request_timeout(),
            )),
            rules: Arc::new(rules),
        })
    }
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for local development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            if config.create_table {
                tracing::warn!("--create-table has no effect with the in-memory backend");
            }

            Self::build(Arc::new(InMemoryRepository::new()), config)
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb {
    use super::*;
    use crate::storage::dynamodb::create_user_table;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        ///
        /// Uses the AWS SDK default credential chain; `AWS_ENDPOINT_URL`
        /// points it at a local DynamoDB.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);

            if config.create_table {
                create_user_table(&dynamodb_client, &config.table_name, &config.email_index)
                    .await?;
            }

            let dynamodb_repo = Arc::new(DynamoDbRepository::new(
                dynamodb_client,
                config.table_name.clone(),
                config.email_index.clone(),
            ));
            tracing::info!(table = %dynamodb_repo.table_name(), "Using DynamoDB storage");

            Self::build(dynamodb_repo, config)
        }
    }
}
