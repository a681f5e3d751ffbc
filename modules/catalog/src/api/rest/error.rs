use clinic_http::ApiError;

use crate::domain::error::CatalogError;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => ApiError::Validation(errors),
            CatalogError::NotFound => ApiError::NotFound(err.to_string()),
            CatalogError::Internal(e) => ApiError::Internal(e),
        }
    }
}
