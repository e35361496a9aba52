//! DynamoDB attribute conversion functions.
//!
//! Pure functions converting between JSON records and DynamoDB AttributeValue
//! maps. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use pokepost_core::record::Record;
use pokepost_core::storage::StoreError;
use serde_json::{Number, Value};

pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// JSON -> DynamoDB
// ============================================================================

/// Convert a JSON value to an AttributeValue.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(k, v)| (k.clone(), json_to_attribute(v)))
        .collect()
}

// ============================================================================
// DynamoDB -> JSON
// ============================================================================

/// Convert an AttributeValue to a JSON value.
///
/// String and number sets become arrays. Binary attributes have no JSON form
/// and are rejected.
pub fn attribute_to_json(attribute: &AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => item_to_record(map).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(StoreError::Serialization(
            "binary attributes are not supported".to_string(),
        )),
        other => Err(StoreError::Serialization(format!(
            "unsupported attribute: {other:?}"
        ))),
    }
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &Item) -> Result<Record, StoreError> {
    item.iter()
        .map(|(k, v)| attribute_to_json(v).map(|v| (k.clone(), v)))
        .collect()
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a DynamoDB number string, preferring integers.
fn parse_number(raw: &str) -> Result<Number, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Serialization(format!("Invalid number: {raw}")))
}
