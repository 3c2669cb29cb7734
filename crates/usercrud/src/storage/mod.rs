//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `UserRepository`
//! trait defined in `usercrud_core::storage`. The backend is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local storage, enforces email uniqueness atomically
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory backend (default):
//! ```bash
//! cargo build -p usercrud
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p usercrud --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p usercrud --features inmemory"
);

mod deadline;

#[cfg(any(feature = "inmemory", test))]
mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use deadline::DeadlineRepository;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
