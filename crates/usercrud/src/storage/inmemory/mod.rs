//! In-memory storage backend.
//!
//! Stores users in a `HashMap` behind an `Arc<RwLock<_>>`. Data is lost when
//! the repository is dropped, which makes it the backend of choice for tests
//! and local development.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.create_user(&user).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
