//! DynamoDB storage backend implementation.
//!
//! Every collection is its own table with a single string partition key `id`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbBackend;
