use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::Router;
use clinic_auth::{authenticate, authorize, AuthState, ADMIN_ROLES};
use clinic_http::ApiError;

use super::handlers::{self, DirectoryState};

async fn admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    authorize(ADMIN_ROLES, req, next).await
}

/// `/user` and `/role` routes. Login is the only public endpoint;
/// `GET /user/current` needs a session, everything else is admin-only.
pub fn router(state: DirectoryState, auth: AuthState) -> Router {
    let admin = Router::new()
        .route(
            "/user",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route("/user/current", patch(handlers::update_current_user))
        .route(
            "/user/current/password",
            patch(handlers::change_current_password),
        )
        .route(
            "/user/{user_id}",
            get(handlers::read_user)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/role",
            post(handlers::create_role).get(handlers::list_roles),
        )
        .route(
            "/role/{role_id}",
            get(handlers::read_role)
                .patch(handlers::update_role)
                .delete(handlers::delete_role),
        )
        .route_layer(middleware::from_fn(admin_only));

    let authenticated = Router::new()
        .route("/user/current", get(handlers::current_user))
        .merge(admin)
        .layer(middleware::from_fn_with_state(auth, authenticate));

    Router::new()
        .route("/user/login", post(handlers::login))
        .merge(authenticated)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use chrono::Utc;
    use clinic_auth::{password, JwtCodec};
    use clinic_http::FileStorage;
    use tower::ServiceExt as _;

    use crate::domain::model::{
        Credentials, NewUser, Role, RoleListFilter, RoleUsage, User, UserChanges, UserListFilter,
    };
    use crate::domain::repo::{RoleRepository, UserRepository};
    use crate::domain::service::DirectoryService;

    use super::*;

    fn cashier() -> User {
        User {
            id: 2,
            first_name: "Liza".into(),
            last_name: "Dizon".into(),
            email: "liza@clinic.local".into(),
            profile_photo: None,
            active: true,
            roles: vec![Role {
                id: 3,
                name: "Cashier".into(),
            }],
            created_by: None,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct SingleUser {
        user: User,
        password_hash: String,
    }

    #[async_trait]
    impl UserRepository for SingleUser {
        async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<Credentials>> {
            Ok((email == self.user.email).then(|| Credentials {
                user: self.user.clone(),
                password_hash: self.password_hash.clone(),
            }))
        }

        async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
            Ok((id == self.user.id).then(|| self.user.clone()))
        }

        async fn find_active(&self, id: i32, email: &str) -> anyhow::Result<Option<User>> {
            Ok((id == self.user.id && email == self.user.email && self.user.active)
                .then(|| self.user.clone()))
        }

        async fn email_in_use(
            &self,
            _email: &str,
            _exclude_id: Option<i32>,
        ) -> anyhow::Result<bool> {
            Ok(false)
        }

        async fn insert(&self, _new: NewUser) -> anyhow::Result<User> {
            Ok(self.user.clone())
        }

        async fn update(&self, _id: i32, _changes: UserChanges) -> anyhow::Result<Option<User>> {
            Ok(Some(self.user.clone()))
        }

        async fn set_password(
            &self,
            _id: i32,
            _password_hash: &str,
            _actor: i32,
        ) -> anyhow::Result<bool> {
            Ok(true)
        }

        async fn deactivate(&self, _id: i32, _actor: i32) -> anyhow::Result<bool> {
            Ok(true)
        }

        async fn list(&self, _filter: UserListFilter) -> anyhow::Result<(Vec<User>, u64)> {
            Ok((vec![self.user.clone()], 1))
        }
    }

    struct NoRoles;

    #[async_trait]
    impl RoleRepository for NoRoles {
        async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<Role>> {
            Ok(None)
        }

        async fn find_by_ids(&self, _ids: &[i32]) -> anyhow::Result<Vec<Role>> {
            Ok(Vec::new())
        }

        async fn name_in_use(&self, _name: &str, _exclude_id: Option<i32>) -> anyhow::Result<bool> {
            Ok(false)
        }

        async fn insert(&self, name: &str) -> anyhow::Result<Role> {
            Ok(Role {
                id: 1,
                name: name.into(),
            })
        }

        async fn rename(&self, _id: i32, _name: &str) -> anyhow::Result<Option<Role>> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> anyhow::Result<()> {
            Ok(())
        }

        async fn user_count(&self, _id: i32) -> anyhow::Result<u64> {
            Ok(0)
        }

        async fn list(&self, _filter: RoleListFilter) -> anyhow::Result<(Vec<RoleUsage>, u64)> {
            Ok((Vec::new(), 0))
        }
    }

    fn test_app() -> (Router, Arc<JwtCodec>) {
        let codec = Arc::new(JwtCodec::new("routes-test-secret", 1));
        let service = Arc::new(DirectoryService::new(
            Arc::new(SingleUser {
                user: cashier(),
                password_hash: password::hash_password("12345678", 4).unwrap(),
            }),
            Arc::new(NoRoles),
            Arc::clone(&codec),
            4,
        ));

        let tmp = std::env::temp_dir().join("directory-routes-test");
        let state = DirectoryState {
            service: Arc::clone(&service),
            files: FileStorage::new(tmp),
        };
        let auth = AuthState::new(Arc::clone(&codec), service);
        (router(state, auth), codec)
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(path: &str, body: serde_json::Value) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn login_with_empty_body_lists_violations() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(json_post("/user/login", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Invalid parameters, check input");
        assert_eq!(json["validationErrors"][0]["field"], "email");
    }

    #[tokio::test]
    async fn login_then_fetch_current_session() {
        let (app, _) = test_app();
        let resp = app
            .clone()
            .oneshot(json_post(
                "/user/login",
                serde_json::json!({"email": "liza@clinic.local", "password": "12345678"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "User successfully logged in");
        let token = json["data"]["token"].as_str().unwrap().to_owned();

        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/user/current")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "User active session");
        assert_eq!(json["data"]["email"], "liza@clinic.local");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(json_post(
                "/user/login",
                serde_json::json!({"email": "liza@clinic.local", "password": "nope"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn role_routes_need_a_token() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/role")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn cashier_cannot_touch_role_routes() {
        let (app, codec) = test_app();
        let user = cashier();
        let token = codec
            .sign(&clinic_auth::AuthUser {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                profile_photo: None,
                roles: vec!["Cashier".into()],
            })
            .unwrap();

        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/role")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Forbidden resource");
    }
}
