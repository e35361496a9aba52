//! In-memory storage backend.
//!
//! Stores every table as an insertion-ordered vector behind a
//! `tokio::sync::RwLock`, and answers bad scan limits and failed update
//! conditions with the same error codes DynamoDB uses.
//!
//! # Example
//!
//! ```rust,ignore
//! use pokepost::storage::inmemory::InMemoryBackend;
//!
//! let backend = InMemoryBackend::new();
//! ```

mod repository;

pub use repository::InMemoryBackend;
