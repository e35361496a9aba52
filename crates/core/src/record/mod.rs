mod error;
mod operations;
mod types;

pub use error::ValidationError;
pub use operations::{
    build_record, created_at, format_created_at, is_valid_field_name, normalize_required_value,
    sort_by_created_at_desc, validate_field_name, validate_new_record, validate_update,
};
pub use types::{Collection, Record, FIELD_CREATED_AT, FIELD_ID};
