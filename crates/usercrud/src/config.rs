use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding user records (default: "users")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_name: String,
    /// Global secondary index on `email` (default: "email-index")
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub email_index: String,
    /// Budget for each repository operation in milliseconds (default: 200)
    pub request_timeout_ms: u64,
    /// Create the table and index on startup when missing (default: false)
    pub create_table: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE` - User table name (default: "users")
    /// - `DYNAMODB_EMAIL_INDEX` - Email index name (default: "email-index")
    /// - `REQUEST_TIMEOUT_MS` - Per-operation timeout (default: 200)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, applying the same defaults
    /// as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            table_name: lookup("DYNAMODB_TABLE").unwrap_or_else(|| "users".to_string()),
            email_index: lookup("DYNAMODB_EMAIL_INDEX")
                .unwrap_or_else(|| "email-index".to_string()),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
            create_table: false,
        }
    }

    /// Get the per-operation timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
