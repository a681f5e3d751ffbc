use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use clinic_auth::{authenticate, authorize, AuthState, ADMIN_ROLES};
use clinic_http::ApiError;

use super::handlers::{self, CatalogState};

async fn admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    authorize(ADMIN_ROLES, req, next).await
}

/// `/service` routes; every one of them is admin-only.
pub fn router(state: CatalogState, auth: AuthState) -> Router {
    Router::new()
        .route(
            "/service",
            get(handlers::list_services).post(handlers::create_service),
        )
        .route(
            "/service/{service_id}",
            get(handlers::read_service)
                .patch(handlers::update_service)
                .delete(handlers::delete_service),
        )
        .route_layer(middleware::from_fn(admin_only))
        .layer(middleware::from_fn_with_state(auth, authenticate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use chrono::Utc;
    use clinic_auth::{AuthUser, JwtCodec, UserDirectory};
    use clinic_http::FileStorage;
    use tower::ServiceExt as _;

    use crate::domain::model::{NewService, ServiceChanges, ServiceItem, ServiceListFilter};
    use crate::domain::repo::CatalogRepository;
    use crate::domain::service::CatalogService;

    use super::*;

    fn admin() -> AuthUser {
        AuthUser {
            id: 1,
            first_name: "Root".into(),
            last_name: "Admin".into(),
            email: "root@clinic.local".into(),
            profile_photo: None,
            roles: vec!["Super Admin".into()],
        }
    }

    struct StaticDirectory;

    #[async_trait]
    impl UserDirectory for StaticDirectory {
        async fn find_active_user(
            &self,
            _id: i32,
            _email: &str,
        ) -> anyhow::Result<Option<AuthUser>> {
            Ok(Some(admin()))
        }
    }

    fn xray(id: i32) -> ServiceItem {
        ServiceItem {
            id,
            name: "X-Ray".into(),
            logo: "service-logos/x.png".into(),
            category: 2,
            description: "Chest X-Ray".into(),
            price: 350.00,
            others: String::new(),
            created_by: Some(1),
            updated_by: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct OneService;

    #[async_trait]
    impl CatalogRepository for OneService {
        async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<ServiceItem>> {
            Ok((id == 3).then(|| xray(3)))
        }

        async fn name_in_use(
            &self,
            _name: &str,
            _exclude_id: Option<i32>,
        ) -> anyhow::Result<bool> {
            Ok(false)
        }

        async fn insert(&self, new: NewService) -> anyhow::Result<ServiceItem> {
            let mut created = xray(9);
            created.name = new.name;
            Ok(created)
        }

        async fn update(
            &self,
            id: i32,
            _changes: ServiceChanges,
        ) -> anyhow::Result<Option<ServiceItem>> {
            Ok((id == 3).then(|| xray(3)))
        }

        async fn delete(&self, _id: i32) -> anyhow::Result<()> {
            Ok(())
        }

        async fn list(
            &self,
            _filter: ServiceListFilter,
        ) -> anyhow::Result<(Vec<ServiceItem>, u64)> {
            Ok((vec![xray(3)], 1))
        }
    }

    fn test_app() -> (Router, String) {
        let codec = Arc::new(JwtCodec::new("catalog-routes-secret", 1));
        let token = codec.sign(&admin()).unwrap();
        let auth = AuthState::new(Arc::clone(&codec), Arc::new(StaticDirectory));
        let state = CatalogState {
            service: Arc::new(CatalogService::new(Arc::new(OneService))),
            files: FileStorage::new(std::env::temp_dir().join("catalog-routes-test")),
        };
        (router(state, auth), token)
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_wraps_services_with_pagination() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/service?page=1&limit=10")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "List of services offered.");
        assert_eq!(json["data"]["services"][0]["name"], "X-Ray");
        assert_eq!(json["data"]["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn unknown_service_is_404() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/service/42")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Service not found.");
    }

    #[tokio::test]
    async fn delete_reports_the_removed_service() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("DELETE")
                    .uri("/service/3")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "X-Ray successfully deleted.");
    }

    #[tokio::test]
    async fn create_without_logo_reports_missing_fields() {
        let (app, token) = test_app();
        let body = concat!(
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
            "X-Ray\r\n",
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"category\"\r\n\r\n",
            "2\r\n",
            "--boundary\r\n",
            "Content-Disposition: form-data; name=\"price\"\r\n\r\n",
            "350.00\r\n",
            "--boundary--\r\n",
        );
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/service")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=boundary",
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["validationErrors"][0]["field"], "logo");
        assert_eq!(json["validationErrors"][0]["message"], "Logo is required");
    }

    #[tokio::test]
    async fn service_routes_reject_anonymous_callers() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/service")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
