//! The uniform `{status, message, data, validationErrors}` response envelope.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Field path, e.g. `email` or `roles`.
    pub field: String,
    /// Human-readable message, e.g. `Email is required`.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Response wrapper used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// `true` on success, `false` on any error.
    pub status: bool,
    /// Human-readable outcome, e.g. `Jane Doe was successfully created`.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Present only on validation failures, with the full violation list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
            validation_errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: None,
            validation_errors: None,
        }
    }

    /// Failed response; `ApiError` uses this for its envelope bodies.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            validation_errors: None,
        }
    }

    pub fn with_validation_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.validation_errors = Some(errors);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_serializes_camel_case() {
        let resp = ApiResponse::ok("User active session", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], true);
        assert_eq!(json["message"], "User active session");
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("validationErrors").is_none());
    }

    #[test]
    fn failure_envelope_carries_violations() {
        let resp = ApiResponse::failure("Invalid parameters, check input")
            .with_validation_errors(vec![FieldError::new("email", "Email is required")]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], false);
        assert_eq!(json["validationErrors"][0]["field"], "email");
        assert_eq!(json["validationErrors"][0]["message"], "Email is required");
        assert!(json.get("data").is_none());
    }
}
