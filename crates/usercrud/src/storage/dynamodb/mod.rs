//! DynamoDB storage backend implementation.
//!
//! One item per user, keyed by `id`, with a global secondary index on
//! `email` for the uniqueness lookup. Built on `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod keys;
mod repository;
mod schema;

pub use repository::DynamoDbRepository;
pub use schema::create_user_table;
