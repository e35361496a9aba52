//! Generic CRUD over one collection.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::record::{
    build_record, format_created_at, sort_by_created_at_desc, validate_new_record,
    validate_update, Collection, Record,
};
use crate::storage::{KeyValueBackend, Result, StoreError};

/// CRUD access to one collection through a [`KeyValueBackend`].
///
/// The store never retries and never logs: every failure is returned to the
/// caller as a [`StoreError`].
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueBackend>,
    collection: Collection,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>, collection: Collection) -> Self {
        Self {
            backend,
            collection,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Validates `body`, assigns `id` and `createdAt`, merges fixed fields and
    /// persists the record.
    pub async fn create(&self, body: Value) -> Result<Record> {
        let fields = validate_new_record(&self.collection, body)?;
        let record = build_record(
            &self.collection,
            fields,
            Uuid::new_v4().to_string(),
            format_created_at(Utc::now()),
        );

        self.backend
            .put_item(&self.collection.table, &record)
            .await?;

        Ok(record)
    }

    /// Every record, newest first.
    pub async fn list_all(&self) -> Result<Vec<Record>> {
        let mut records = self.backend.scan(&self.collection.table, None).await?;
        sort_by_created_at_desc(&mut records);
        Ok(records)
    }

    /// Scans at most `limit` items, then orders them newest first.
    ///
    /// The cap applies to the scan, so the result is not a top-N of the whole
    /// collection. `limit` is forwarded untouched for the backend to accept or
    /// reject.
    pub async fn list_limited(&self, limit: &str) -> Result<Vec<Record>> {
        let mut records = self
            .backend
            .scan(&self.collection.table, Some(limit))
            .await?;
        sort_by_created_at_desc(&mut records);
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.backend
            .get_item(&self.collection.table, id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                collection: self.collection.name.clone(),
                id: id.to_string(),
            })
    }

    /// Sets one field on an existing record and returns the updated record.
    ///
    /// A missing record surfaces as the backend's conditional-check error.
    pub async fn update_field(&self, id: &str, field: &str, value: Value) -> Result<Record> {
        let value = validate_update(&self.collection, field, value)?;
        self.backend
            .update_field(&self.collection.table, id, field, &value)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.backend.delete_item(&self.collection.table, id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;
    use serde_json::json;

    use super::*;
    use crate::record::{created_at, FIELD_ID};
    use crate::storage::BackendError;

    /// Minimal backend keeping tables as insertion-ordered vectors.
    #[derive(Default)]
    struct FakeBackend {
        tables: Mutex<HashMap<String, Vec<Record>>>,
        fail_writes: bool,
    }

    fn id_of(record: &Record) -> Option<&str> {
        record.get(FIELD_ID).and_then(Value::as_str)
    }

    #[async_trait]
    impl KeyValueBackend for FakeBackend {
        async fn put_item(&self, table: &str, record: &Record) -> Result<()> {
            if self.fail_writes {
                return Err(BackendError::new(500, "InternalServerError", "disk on fire").into());
            }
            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(table.to_string()).or_default();
            rows.retain(|r| id_of(r) != id_of(record));
            rows.push(record.clone());
            Ok(())
        }

        async fn get_item(&self, table: &str, id: &str) -> Result<Option<Record>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .get(table)
                .and_then(|rows| rows.iter().find(|r| id_of(r) == Some(id)))
                .cloned())
        }

        async fn scan(&self, table: &str, limit: Option<&str>) -> Result<Vec<Record>> {
            let cap = match limit {
                Some(raw) => match raw.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(BackendError::new(400, BackendError::VALIDATION, "bad limit")
                            .into())
                    }
                },
                None => usize::MAX,
            };
            let tables = self.tables.lock().unwrap();
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
            let mut tables = self.tables.lock().unwrap();
            let record = tables
                .get_mut(table)
                .and_then(|rows| rows.iter_mut().find(|r| id_of(r) == Some(id)))
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
            let mut tables = self.tables.lock().unwrap();
            if let Some(rows) = tables.get_mut(table) {
                rows.retain(|r| id_of(r) != Some(id));
            }
            Ok(())
        }
    }

    fn pokemon_collection() -> Collection {
        Collection::new("Pokemon", "pokemon")
            .with_required_field("name")
            .with_required_field("type")
            .with_mutable_field("name")
            .with_mutable_field("type")
    }

    fn post_collection() -> Collection {
        Collection::new("Post", "posts")
            .with_required_field("title")
            .with_required_field("body")
            .with_fixed_field("userId", "author-1")
            .with_mutable_field("title")
            .with_mutable_field("body")
    }

    fn stores() -> (RecordStore, RecordStore) {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(FakeBackend::default());
        (
            RecordStore::new(backend.clone(), pokemon_collection()),
            RecordStore::new(backend, post_collection()),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let (pokemon, _) = stores();

        let first = pokemon
            .create(json!({"name": "Pikachu", "type": "Electric"}))
            .await
            .unwrap();
        let second = pokemon
            .create(json!({"name": "Pikachu", "type": "Electric"}))
            .await
            .unwrap();
        let after = Utc::now();

        let first_id = first["id"].as_str().unwrap();
        assert!(!first_id.is_empty());
        assert_ne!(first_id, second["id"].as_str().unwrap());

        let stamped = DateTime::parse_from_rfc3339(created_at(&first).unwrap()).unwrap();
        assert!(stamped <= after);
    }

    #[tokio::test]
    async fn test_create_merges_fixed_fields() {
        let (_, posts) = stores();

        let post = posts
            .create(json!({"title": "Hi", "body": "First post", "userId": "mallory"}))
            .await
            .unwrap();

        assert_eq!(post["userId"], "author-1");
        assert_eq!(post["title"], "Hi");
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let (pokemon, _) = stores();

        let result = pokemon.create(json!({"name": "", "type": "Electric"})).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = pokemon.create(json!({"name": "Pikachu", "type": " \t "})).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        assert!(pokemon.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_surfaces_backend_error() {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(FakeBackend {
            fail_writes: true,
            ..Default::default()
        });
        let pokemon = RecordStore::new(backend, pokemon_collection());

        let result = pokemon
            .create(json!({"name": "Pikachu", "type": "Electric"}))
            .await;

        assert_eq!(
            result,
            Err(StoreError::Backend(BackendError::new(
                500,
                "InternalServerError",
                "disk on fire"
            )))
        );
    }

    #[tokio::test]
    async fn test_get_returns_created_record() {
        let (pokemon, _) = stores();

        let created = pokemon
            .create(json!({"name": "Bulbasaur", "type": "Grass", "level": 5}))
            .await
            .unwrap();
        let fetched = pokemon.get(created["id"].as_str().unwrap()).await.unwrap();

        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (pokemon, _) = stores();

        let result = pokemon.get("never-created").await;

        assert_eq!(
            result,
            Err(StoreError::NotFound {
                collection: "Pokemon".to_string(),
                id: "never-created".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_collections_are_disjoint() {
        let (pokemon, posts) = stores();

        let created = pokemon
            .create(json!({"name": "Mew", "type": "Psychic"}))
            .await
            .unwrap();

        assert!(posts.get(created["id"].as_str().unwrap()).await.is_err());
        assert!(posts.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_field_changes_only_that_field() {
        let (pokemon, _) = stores();

        let created = pokemon
            .create(json!({"name": "Charmander", "type": "Fire"}))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let updated = pokemon
            .update_field(id, "name", json!("Charmeleon"))
            .await
            .unwrap();

        assert_eq!(updated["name"], "Charmeleon");
        let mut expected = created.clone();
        expected.insert("name".to_string(), json!("Charmeleon"));
        assert_eq!(updated, expected);
    }

    #[tokio::test]
    async fn test_update_required_field_keeps_value_verbatim() {
        let (pokemon, _) = stores();

        let created = pokemon
            .create(json!({"name": "Pichu", "type": "Electric"}))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let updated = pokemon
            .update_field(id, "name", json!("  Pikachu "))
            .await
            .unwrap();
        assert_eq!(updated["name"], "  Pikachu ");
        assert_eq!(pokemon.get(id).await.unwrap()["name"], "  Pikachu ");

        let blank = pokemon.update_field(id, "name", json!("   ")).await;
        assert!(matches!(blank, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_field_missing_record_fails_with_backend_error() {
        let (pokemon, _) = stores();

        let result = pokemon.update_field("ghost", "name", json!("Gastly")).await;

        match result {
            Err(StoreError::Backend(err)) => assert!(err.is_conditional_check_failed()),
            other => panic!("expected conditional check failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_field_rejects_store_managed_fields() {
        let (_, posts) = stores();

        let created = posts
            .create(json!({"title": "Hi", "body": "Body"}))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        for field in ["id", "createdAt", "userId", "", "title = :v, body"] {
            let result = posts.update_field(id, field, json!("x")).await;
            assert!(
                matches!(result, Err(StoreError::Validation(_))),
                "field {field:?} should be rejected"
            );
        }

        assert_eq!(posts.get(id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (pokemon, _) = stores();

        let created = pokemon
            .create(json!({"name": "Squirtle", "type": "Water"}))
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        pokemon.delete(id).await.unwrap();

        assert!(matches!(
            pokemon.get(id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(pokemon.delete(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_all_is_newest_first() {
        let (pokemon, _) = stores();

        for name in ["Oddish", "Gloom", "Vileplume"] {
            pokemon
                .create(json!({"name": name, "type": "Grass"}))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let records = pokemon.list_all().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"], "Vileplume");
        for pair in records.windows(2) {
            assert!(created_at(&pair[0]) >= created_at(&pair[1]));
        }
    }

    #[tokio::test]
    async fn test_list_limited_caps_scan_and_forwards_limit() {
        let (pokemon, _) = stores();

        for name in ["Zubat", "Golbat", "Crobat"] {
            pokemon
                .create(json!({"name": name, "type": "Poison"}))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        // The cap applies to the scan, so only the two oldest come back, newest first.
        let page = pokemon.list_limited("2").await.unwrap();
        let names: Vec<&str> = page.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["Golbat", "Zubat"]);
        assert!(created_at(&page[0]) > created_at(&page[1]));

        let all = pokemon.list_limited("10").await.unwrap();
        let names: Vec<&str> = all.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["Crobat", "Golbat", "Zubat"]);

        let result = pokemon.list_limited("many").await;
        match result {
            Err(StoreError::Backend(err)) => assert_eq!(err.status, 400),
            other => panic!("expected backend rejection, got {other:?}"),
        }
    }
}
