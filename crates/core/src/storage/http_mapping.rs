//! Pure functions for mapping store errors to HTTP status codes.
//!
//! Follows the Functional Core pattern: no side effects, trivially testable.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `Validation` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Backend` -> the status the backend reported when it is an error status
///   (400..=599), otherwise 500
/// - `Serialization` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use pokepost_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::NotFound {
///     collection: "Pokemon".to_string(),
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(store_error_to_status_code(&error), 404);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::Validation(_) => 400,
        StoreError::NotFound { .. } => 404,
        StoreError::Backend(backend) if (400..=599).contains(&backend.status) => backend.status,
        StoreError::Backend(_) => 500,
        StoreError::Serialization(_) => 500,
    }
}
