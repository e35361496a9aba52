//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError::Backend`, carrying the service's HTTP
//! status, error code and message through unchanged.

use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use pokepost_core::storage::{BackendError, StoreError};

/// Map any operation's SDK error to a pass-through backend error.
///
/// Service errors keep the status of the raw response. Failures that never
/// reached the service get a synthetic status: 504 for timeouts, 503 for
/// dispatch failures, 500 otherwise.
pub fn map_sdk_error<E>(err: SdkError<E, HttpResponse>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let backend = match &err {
        SdkError::ServiceError(ctx) => BackendError::new(
            ctx.raw().status().as_u16(),
            err.code().unwrap_or("Unknown"),
            err.message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string()),
        ),
        SdkError::ResponseError(ctx) => BackendError::new(
            ctx.raw().status().as_u16(),
            "ResponseError",
            DisplayErrorContext(&err).to_string(),
        ),
        SdkError::TimeoutError(_) => {
            BackendError::new(504, "TimeoutError", DisplayErrorContext(&err).to_string())
        }
        SdkError::DispatchFailure(_) => {
            BackendError::new(503, "DispatchFailure", DisplayErrorContext(&err).to_string())
        }
        _ => BackendError::new(500, "ClientError", DisplayErrorContext(&err).to_string()),
    };

    StoreError::Backend(backend)
}

/// Rejects a scan limit that cannot be sent as DynamoDB's 32-bit `Limit`.
pub fn invalid_limit(raw: &str) -> StoreError {
    StoreError::Backend(BackendError::new(
        400,
        BackendError::VALIDATION,
        format!("1 validation error detected: Value '{raw}' at 'limit' is not a valid integer"),
    ))
}
