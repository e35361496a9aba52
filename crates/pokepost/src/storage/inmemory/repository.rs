//! In-memory backend implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use pokepost_core::record::{Record, FIELD_ID};
use pokepost_core::storage::{BackendError, KeyValueBackend, Result};

type Table = Vec<Record>;

/// In-memory storage backend.
///
/// Tables are created on first write. Data is not persisted and will be lost
/// when the backend is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get(FIELD_ID).and_then(Value::as_str)
}

/// Interprets a scan limit the way DynamoDB does: a positive 32-bit integer.
fn parse_limit(raw: &str) -> std::result::Result<usize, BackendError> {
    match raw.parse::<i32>() {
        Ok(n) if n >= 1 => Ok(n as usize),
        Ok(_) => Err(BackendError::new(
            400,
            BackendError::VALIDATION,
            format!(
                "1 validation error detected: Value '{raw}' at 'limit' failed to satisfy \
                 constraint: Member must have value greater than or equal to 1"
            ),
        )),
        Err(_) => Err(BackendError::new(
            400,
            BackendError::VALIDATION,
            format!("1 validation error detected: Value '{raw}' at 'limit' is not a valid integer"),
        )),
    }
}

#[async_trait]
impl KeyValueBackend for InMemoryBackend {
    async fn put_item(&self, table: &str, record: &Record) -> Result<()> {
        let Some(id) = record_id(record) else {
            return Err(BackendError::new(
                400,
                BackendError::VALIDATION,
                "One of the required keys was not given a value",
            )
            .into());
        };

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        match rows.iter_mut().find(|r| record_id(r) == Some(id)) {
            Some(existing) => *existing = record.clone(),
            None => rows.push(record.clone()),
        }
        Ok(())
    }

    async fn get_item(&self, table: &str, id: &str) -> Result<Option<Record>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    async fn scan(&self, table: &str, limit: Option<&str>) -> Result<Vec<Record>> {
        let cap = match limit {
            Some(raw) => parse_limit(raw)?,
            None => usize::MAX,
        };

        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().take(cap).cloned().collect())
            .unwrap_or_default())
    }

    async fn update_field(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: &Value,
    ) -> Result<Record> {
        let mut tables = self.tables.write().await;
        let record = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or_else(|| {
                BackendError::new(
                    400,
                    BackendError::CONDITIONAL_CHECK_FAILED,
                    "The conditional request failed",
                )
            })?;

        record.insert(field.to_string(), value.clone());
        Ok(record.clone())
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| record_id(r) != Some(id));
        }
        Ok(())
    }
}
