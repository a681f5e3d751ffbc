use clinic_http::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid parameters, check input")]
    Validation(Vec<FieldError>),

    #[error("Service not found.")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}
