//! Error-to-envelope mapping shared by all modules.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::envelope::{ApiResponse, FieldError};

/// Handler result alias; any `ApiError` renders as a `status:false` envelope.
pub type ApiResult<T> = Result<T, ApiError>;

/// The three client-facing error kinds plus the generic server error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more field-level violations, surfaced all at once.
    #[error("Invalid parameters, check input")]
    Validation(Vec<FieldError>),

    /// A named resource lookup returned no row.
    #[error("{0}")]
    NotFound(String),

    /// Authentication failed before the handler ran, or login was rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// The authenticated user's roles do not intersect the route's roles.
    #[error("{0}")]
    Forbidden(String),

    /// A business rule rejected the request (e.g. role still has users).
    #[error("{0}")]
    Rule(String),

    /// Anything unexpected; detail is logged, never sent to the caller.
    #[error("Something went wrong, try again later")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{resource} not found."))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Rule(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(errors) => ApiResponse::failure("Invalid parameters, check input")
                .with_validation_errors(errors),
            Self::Internal(ref source) => {
                tracing::error!(error = ?source, "request failed with internal error");
                ApiResponse::failure(self.to_string())
            }
            other => ApiResponse::failure(other.to_string()),
        };
        (status, body).into_response()
    }
}
