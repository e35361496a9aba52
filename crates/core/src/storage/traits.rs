use async_trait::async_trait;
use serde_json::Value;

use crate::record::Record;

use super::Result;

/// A key-value store addressed by table name, keyed by the `id` field.
///
/// Every method is a single round trip with per-record atomicity. Errors the
/// backend reports are returned as [`super::BackendError`] without
/// reinterpretation.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Writes a record unconditionally, replacing any record with the same id.
    async fn put_item(&self, table: &str, record: &Record) -> Result<()>;

    /// Gets a record by its id.
    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Record>>;

    /// Scans the table. `limit` caps the number of items examined and is
    /// forwarded as the caller supplied it; interpreting it is up to the
    /// backend.
    async fn scan(&self, table: &str, limit: Option<&str>) -> Result<Vec<Record>>;

    /// Sets one field on an existing record and returns the full new record.
    ///
    /// Fails with a conditional-check backend error when `id` does not exist.
    async fn update_field(&self, table: &str, id: &str, field: &str, value: &Value)
        -> Result<Record>;

    /// Deletes a record by id. Deleting an absent id succeeds.
    async fn delete_item(&self, table: &str, id: &str) -> Result<()>;
}
