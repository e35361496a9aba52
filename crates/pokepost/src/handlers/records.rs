//! Record CRUD handlers, shared by every collection.
//!
//! Each collection mounts these handlers on its own router with its
//! `RecordStore` as state.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use pokepost_core::record::{Record, FIELD_ID};
use pokepost_core::storage::StoreError;
use pokepost_core::store::RecordStore;

use crate::handlers::AppError;

/// Body of a field update (PUT /{collection}/{id}).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    pub field_name: String,
    pub field_value: Value,
}

/// Turns a body extraction failure into a 400 in the standard envelope.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, StoreError> {
    body.map(|Json(value)| value)
        .map_err(|e| StoreError::Validation(format!("Invalid request body: {}", e.body_text())))
}

/// Create a record (POST /{collection}).
pub async fn create_record(
    State(store): State<RecordStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let record = store.create(parse_body(body)?).await?;

    tracing::info!(
        collection = %store.collection().name,
        id = record_id(&record),
        "Created record"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// List every record, newest first (GET /{collection}).
pub async fn list_records(State(store): State<RecordStore>) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(store.list_all().await?))
}

/// List records from a capped scan, newest first (GET /{collection}/limit/{count}).
pub async fn list_limited_records(
    State(store): State<RecordStore>,
    Path(count): Path<String>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(store.list_limited(&count).await?))
}

/// Get a record by ID (GET /{collection}/{id}).
pub async fn get_record(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    Ok(Json(store.get(&id).await?))
}

/// Set one field of a record (PUT /{collection}/{id}).
pub async fn update_record(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
    body: Result<Json<UpdateFieldRequest>, JsonRejection>,
) -> Result<Json<Record>, AppError> {
    let UpdateFieldRequest {
        field_name,
        field_value,
    } = parse_body(body)?;

    let record = store.update_field(&id, &field_name, field_value).await?;

    tracing::info!(
        collection = %store.collection().name,
        id = %id,
        field = %field_name,
        "Updated record"
    );

    Ok(Json(record))
}

/// Delete a record by ID (DELETE /{collection}/{id}).
///
/// Succeeds whether or not the record existed.
pub async fn delete_record(
    State(store): State<RecordStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete(&id).await?;

    let name = &store.collection().name;
    tracing::info!(collection = %name, id = %id, "Deleted record");

    Ok(Json(json!({ "message": format!("{name} deleted") })))
}

fn record_id(record: &Record) -> &str {
    record.get(FIELD_ID).and_then(Value::as_str).unwrap_or_default()
}
