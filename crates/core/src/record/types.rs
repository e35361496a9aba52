use serde_json::{Map, Value};

/// One stored entity: a mapping from field name to JSON value.
pub type Record = Map<String, Value>;

/// Store-assigned primary key field.
pub const FIELD_ID: &str = "id";

/// Store-assigned creation timestamp field.
pub const FIELD_CREATED_AT: &str = "createdAt";

/// Configuration of one collection served by a [`crate::store::RecordStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Display name used in messages (e.g. `Pokemon`).
    pub name: String,
    /// Backend table holding the records.
    pub table: String,
    /// Fields that must be non-empty strings on create.
    pub required_fields: Vec<String>,
    /// Fields stamped on every record at creation.
    pub fixed_fields: Record,
    /// Fields `update_field` may change.
    pub mutable_fields: Vec<String>,
}

impl Collection {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            required_fields: Vec::new(),
            fixed_fields: Record::new(),
            mutable_fields: Vec::new(),
        }
    }

    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }

    pub fn with_fixed_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fixed_fields.insert(field.into(), value.into());
        self
    }

    pub fn with_mutable_field(mut self, field: impl Into<String>) -> Self {
        self.mutable_fields.push(field.into());
        self
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required_fields.iter().any(|f| f == field)
    }

    pub fn is_fixed(&self, field: &str) -> bool {
        self.fixed_fields.contains_key(field)
    }

    pub fn is_mutable(&self, field: &str) -> bool {
        self.mutable_fields.iter().any(|f| f == field)
    }
}
