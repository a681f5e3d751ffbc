use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use clinic_auth::{authenticate, authorize, AuthState, ADMIN_ROLES, ROLE_SUPER_ADMIN};
use clinic_http::ApiError;

use super::handlers::{self, StorefrontState};

const SUPER_ADMIN_ONLY: &[&str] = &[ROLE_SUPER_ADMIN];

async fn super_admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    authorize(SUPER_ADMIN_ONLY, req, next).await
}

async fn admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    authorize(ADMIN_ROLES, req, next).await
}

/// `/store` routes. Reading the profile is reserved for the super admin;
/// editing is open to both admin roles.
pub fn router(state: StorefrontState, auth: AuthState) -> Router {
    let read = Router::new()
        .route("/store", get(handlers::read_store))
        .route_layer(middleware::from_fn(super_admin_only));

    let edit = Router::new()
        .route("/store", patch(handlers::update_store))
        .route_layer(middleware::from_fn(admin_only));

    read.merge(edit)
        .layer(middleware::from_fn_with_state(auth, authenticate))
        .with_state(state)
}
