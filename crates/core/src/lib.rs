//! Functional core for pokepost.
//!
//! Holds the record model, the pure validation and ordering functions, the
//! storage error taxonomy, the [`storage::KeyValueBackend`] seam and the
//! generic [`store::RecordStore`] that implements CRUD once for every
//! collection.

pub mod record;
pub mod storage;
pub mod store;
