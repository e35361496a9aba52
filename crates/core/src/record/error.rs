use thiserror::Error;

use crate::storage::StoreError;

/// Errors raised when caller input fails a collection's rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{collection} body must be a JSON object")]
    NotAnObject { collection: String },
    #[error("{collection} requires a non-empty `{field}`")]
    MissingField { collection: String, field: String },
    #[error("{collection} field `{field}` must be a string")]
    NotAString { collection: String, field: String },
    #[error("Field name cannot be empty")]
    EmptyFieldName,
    #[error("Invalid field name: {0}")]
    MalformedFieldName(String),
    #[error("Field `{0}` is managed by the store and cannot be updated")]
    ImmutableField(String),
    #[error("`{field}` is not an updatable {collection} field")]
    FieldNotUpdatable { collection: String, field: String },
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err.to_string())
    }
}
