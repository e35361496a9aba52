mod error;
mod http_mapping;
mod traits;

pub use error::{BackendError, Result, StoreError};
pub use http_mapping::store_error_to_status_code;
pub use traits::KeyValueBackend;
