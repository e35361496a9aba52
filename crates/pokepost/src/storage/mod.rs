//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! `pokepost_core::storage::KeyValueBackend`. The implementation is selected
//! at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local tables, for development and tests
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p pokepost --no-default-features --features dynamodb
//! ```

use std::sync::Arc;

use pokepost_core::storage::KeyValueBackend;

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p pokepost --features dynamodb"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryBackend;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbBackend;

/// Connects the backend selected at compile time.
#[cfg(feature = "inmemory")]
pub async fn connect() -> anyhow::Result<Arc<dyn KeyValueBackend>> {
    tracing::warn!("Using in-memory storage; records are lost on shutdown");
    Ok(Arc::new(InMemoryBackend::new()))
}

/// Connects the backend selected at compile time.
#[cfg(feature = "dynamodb")]
pub async fn connect() -> anyhow::Result<Arc<dyn KeyValueBackend>> {
    let backend = DynamoDbBackend::from_env().await;
    tracing::info!("Using DynamoDB storage");
    Ok(Arc::new(backend))
}
