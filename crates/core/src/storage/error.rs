use thiserror::Error;

/// An error reported by the key-value backend, passed through verbatim.
///
/// `status` is the HTTP status the backend answered with, `code` is the
/// backend's own error code (e.g. `ConditionalCheckFailedException`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub const CONDITIONAL_CHECK_FAILED: &'static str = "ConditionalCheckFailedException";
    pub const VALIDATION: &'static str = "ValidationException";

    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// True when an existence-conditioned write was rejected.
    pub fn is_conditional_check_failed(&self) -> bool {
        self.code == Self::CONDITIONAL_CHECK_FAILED
    }
}

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{collection} not found: {id}")]
    NotFound { collection: String, id: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
