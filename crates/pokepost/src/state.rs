//! Application state: one record store per collection over a shared backend.

use std::sync::Arc;

use pokepost_core::storage::KeyValueBackend;
use pokepost_core::store::RecordStore;

use crate::{collections, config::Config};

/// Shared application state.
///
/// Cloned into the router; the stores share one backend connection.
#[derive(Clone)]
pub struct AppState {
    pub pokemon: RecordStore,
    pub posts: RecordStore,
}

impl AppState {
    /// Creates the state for both collections on top of `backend`.
    pub fn new(backend: Arc<dyn KeyValueBackend>, config: &Config) -> Self {
        Self {
            pokemon: RecordStore::new(backend.clone(), collections::pokemon(config)),
            posts: RecordStore::new(backend, collections::posts(config)),
        }
    }
}

#[cfg(feature = "inmemory")]
impl Default for AppState {
    /// In-memory state with configuration from the environment.
    fn default() -> Self {
        Self::new(
            Arc::new(crate::storage::InMemoryBackend::new()),
            &Config::default(),
        )
    }
}
