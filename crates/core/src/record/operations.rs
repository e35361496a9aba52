use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::error::ValidationError;
use super::types::{Collection, Record, FIELD_CREATED_AT, FIELD_ID};

/// Formats a creation timestamp as fixed-width ISO-8601 (`2024-01-15T10:30:00.000Z`).
///
/// The fixed width keeps lexicographic and chronological order identical.
pub fn format_created_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the `createdAt` string of a record, if present.
pub fn created_at(record: &Record) -> Option<&str> {
    record.get(FIELD_CREATED_AT).and_then(Value::as_str)
}

/// Checks a required field value, returning it trimmed.
pub fn normalize_required_value(
    collection: &Collection,
    field: &str,
    value: Option<&Value>,
) -> Result<Value, ValidationError> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Value::String(s.trim().to_string())),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ValidationError::MissingField {
            collection: collection.name.clone(),
            field: field.to_string(),
        }),
        Some(_) => Err(ValidationError::NotAString {
            collection: collection.name.clone(),
            field: field.to_string(),
        }),
    }
}

/// Validates a create body against the collection's required fields.
///
/// Returns the body as a record with required values trimmed.
pub fn validate_new_record(collection: &Collection, body: Value) -> Result<Record, ValidationError> {
    let Value::Object(mut fields) = body else {
        return Err(ValidationError::NotAnObject {
            collection: collection.name.clone(),
        });
    };

    for field in &collection.required_fields {
        let value = normalize_required_value(collection, field, fields.get(field))?;
        fields.insert(field.clone(), value);
    }

    Ok(fields)
}

/// Builds the record to persist: caller fields, then fixed fields, then the
/// store-assigned `id` and `createdAt`. Later writes win.
pub fn build_record(collection: &Collection, fields: Record, id: String, created_at: String) -> Record {
    let mut record = fields;
    for (field, value) in &collection.fixed_fields {
        record.insert(field.clone(), value.clone());
    }
    record.insert(FIELD_ID.to_string(), Value::String(id));
    record.insert(FIELD_CREATED_AT.to_string(), Value::String(created_at));
    record
}

/// True for names made of ASCII letters, digits and `_`, not starting with a digit.
pub fn is_valid_field_name(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates a field name for `update_field`.
pub fn validate_field_name(collection: &Collection, field: &str) -> Result<(), ValidationError> {
    if field.is_empty() {
        return Err(ValidationError::EmptyFieldName);
    }
    if !is_valid_field_name(field) {
        return Err(ValidationError::MalformedFieldName(field.to_string()));
    }
    if field == FIELD_ID || field == FIELD_CREATED_AT || collection.is_fixed(field) {
        return Err(ValidationError::ImmutableField(field.to_string()));
    }
    if !collection.is_mutable(field) {
        return Err(ValidationError::FieldNotUpdatable {
            collection: collection.name.clone(),
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an update and returns the value to store.
///
/// Required fields must stay non-empty strings, but the value is stored
/// exactly as given.
pub fn validate_update(
    collection: &Collection,
    field: &str,
    value: Value,
) -> Result<Value, ValidationError> {
    validate_field_name(collection, field)?;
    if collection.is_required(field) {
        normalize_required_value(collection, field, Some(&value))?;
    }
    Ok(value)
}

/// Orders records newest first by `createdAt`.
///
/// Records without a timestamp go last. Equal timestamps keep their input order.
pub fn sort_by_created_at_desc(records: &mut [Record]) {
    records.sort_by(|a, b| match (created_at(a), created_at(b)) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
