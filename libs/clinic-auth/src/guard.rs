//! The two pre-handler checks: bearer-token authentication and role-set
//! authorization.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use clinic_http::ApiError;

use crate::jwt::JwtCodec;
use crate::principal::AuthUser;
use crate::UserDirectory;

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<JwtCodec>,
    pub directory: Arc<dyn UserDirectory>,
}

impl AuthState {
    pub fn new(codec: Arc<JwtCodec>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { codec, directory }
    }
}

/// Authentication guard. Verifies the bearer token, re-checks the user
/// against the directory (must still exist, same email, active), then
/// attaches the sanitized [`AuthUser`] to the request. Fails closed with
/// 401 on any discrepancy.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or_else(unauthorized)?;

    let claims = state.codec.verify(token).map_err(|e| {
        tracing::warn!(error = %e, path = req.uri().path(), "bearer token rejected");
        unauthorized()
    })?;

    let user = state
        .directory
        .find_active_user(claims.sub, &claims.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(unauthorized)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Authorization guard. Passes when the authenticated user's role set
/// intersects `required`; a route without this layer is authn-only.
pub async fn authorize(
    required: &'static [&'static str],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(unauthorized)?;

    if !user.has_any_role(required) {
        tracing::warn!(
            user_id = user.id,
            path = req.uri().path(),
            "role check failed"
        );
        return Err(ApiError::Forbidden("Forbidden resource".into()));
    }

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".into())
}

/// Extractor for handlers that need the authenticated user.
pub struct CurrentUser(pub AuthUser);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(unauthorized)
    }
}
