//! Helpers for the explicit per-DTO validation functions.

use crate::envelope::FieldError;
use crate::error::ApiError;

/// Turn a collected violation list into the uniform validation error.
pub fn ensure(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Light-weight shape check: `local@domain` with a dot in the domain.
pub fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
