use clinic_http::ApiError;

use crate::domain::error::StorefrontError;

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        match err {
            StorefrontError::Internal(e) => ApiError::Internal(e),
        }
    }
}
