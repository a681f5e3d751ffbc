use clinic_http::ApiError;

use crate::domain::error::DirectoryError;

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(errors) => Self::Validation(errors),
            DirectoryError::InvalidCredentials => {
                Self::Unauthorized("Invalid login credentials".into())
            }
            e @ (DirectoryError::UserNotFound | DirectoryError::RoleNotFound) => {
                Self::NotFound(e.to_string())
            }
            e @ DirectoryError::RoleInUse(_) => Self::Rule(e.to_string()),
            DirectoryError::Internal(source) => Self::Internal(source),
        }
    }
}
