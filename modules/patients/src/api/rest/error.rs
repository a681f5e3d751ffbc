use clinic_http::ApiError;

use crate::domain::error::PatientError;

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Validation(errors) => Self::Validation(errors),
            e @ PatientError::NotFound => Self::NotFound(e.to_string()),
            PatientError::Internal(source) => Self::Internal(source),
        }
    }
}
