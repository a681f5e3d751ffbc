use clinic_http::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Invalid parameters, check input")]
    Validation(Vec<FieldError>),

    /// Wrong password, unknown email, or deactivated account; the caller
    /// is never told which.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User not found.")]
    UserNotFound,

    #[error("Role not found.")]
    RoleNotFound,

    /// Role deletion while users still reference it.
    #[error("Unable to delete role, {0} has users.")]
    RoleInUse(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}
