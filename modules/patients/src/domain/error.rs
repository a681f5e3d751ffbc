use clinic_http::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Invalid parameters, check input")]
    Validation(Vec<FieldError>),

    #[error("Patient not found.")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PatientError {
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}
