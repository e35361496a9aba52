use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pokepost_core::storage::{store_error_to_status_code, StoreError};

/// Error type returned by handlers, rendered as `{ "error": ..., "code": ... }`.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self.0.downcast_ref::<StoreError>() {
            Some(store_error) => {
                let code = store_error_to_status_code(store_error);
                let status =
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = match store_error {
                    StoreError::Backend(backend) => json!({
                        "error": backend.message,
                        "code": backend.code,
                    }),
                    other => json!({ "error": other.to_string() }),
                };
                (status, body)
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.0.to_string() }),
            ),
        };

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "API error");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "API error");
        }

        (status_code, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
