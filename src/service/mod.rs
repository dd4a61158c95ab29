//! Write-path validation invoked by handlers before the store is touched.

mod validation;
pub use validation::{
    validate_description, validate_name, validate_strength, RequestValidator,
    DESCRIPTION_MIN_LENGTH,
};
