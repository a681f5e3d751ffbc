use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use clinic_auth::{authenticate, authorize, AuthState, ADMIN_ROLES};
use clinic_http::ApiError;

use super::handlers::{self, PatientsState};

async fn admin_only(req: Request, next: Next) -> Result<Response, ApiError> {
    authorize(ADMIN_ROLES, req, next).await
}

/// `/patient` routes; every one of them is admin-only.
pub fn router(state: PatientsState, auth: AuthState) -> Router {
    Router::new()
        .route(
            "/patient/personal-information",
            post(handlers::create_personal_information),
        )
        .route(
            "/patient/personal-information/{patient_id}",
            patch(handlers::update_personal_information),
        )
        .route(
            "/patient/contact-information/{patient_id}",
            patch(handlers::update_contact_information),
        )
        .route(
            "/patient/address-information/{patient_id}",
            patch(handlers::update_address_information),
        )
        .route(
            "/patient/{patient_id}/photo",
            post(handlers::upload_photos).delete(handlers::delete_photos),
        )
        .route(
            "/patient/{patient_id}/documents",
            post(handlers::upload_documents),
        )
        .route(
            "/patient/{patient_id}/document",
            delete(handlers::delete_documents),
        )
        .route("/patient", get(handlers::list))
        .route("/patient/{patient_id}", get(handlers::detail))
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
    use chrono::{NaiveDate, Utc};
    use clinic_auth::{AuthUser, JwtCodec, UserDirectory};
    use clinic_http::FileStorage;
    use tower::ServiceExt as _;

    use crate::domain::model::{
        Address, ContactInformation, DocumentMeta, Patient, PatientDetail, PatientDocument,
        PatientPhoto, PatientSummary, PersonalInformation,
    };
    use crate::domain::repo::PatientRepository;
    use crate::domain::service::PatientService;

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

    fn stored_patient() -> Patient {
        Patient {
            id: 7,
            control_no: Some("20260101-000007".into()),
            first_name: "Juan".into(),
            middle_name: "Ponce".into(),
            last_name: "Dela Cruz".into(),
            gender: "male".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            mobile_no: None,
            email: None,
            address: Address::default(),
            created_by: Some(1),
            updated_by: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct OnePatient;

    #[async_trait]
    impl PatientRepository for OnePatient {
        async fn insert(
            &self,
            info: PersonalInformation,
            _actor: i32,
        ) -> anyhow::Result<Patient> {
            let mut p = stored_patient();
            p.control_no = None;
            p.first_name = info.first_name;
            p.last_name = info.last_name;
            Ok(p)
        }

        async fn assign_control_no(&self, _id: i32, _control_no: &str) -> anyhow::Result<()> {
            Ok(())
        }

        async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Patient>> {
            Ok((id == 7).then(stored_patient))
        }

        async fn update_personal(
            &self,
            id: i32,
            _info: PersonalInformation,
            _actor: i32,
        ) -> anyhow::Result<Option<Patient>> {
            Ok((id == 7).then(stored_patient))
        }

        async fn update_contact(
            &self,
            id: i32,
            _info: ContactInformation,
            _actor: i32,
        ) -> anyhow::Result<Option<Patient>> {
            Ok((id == 7).then(stored_patient))
        }

        async fn update_address(
            &self,
            id: i32,
            _address: Address,
            _actor: i32,
        ) -> anyhow::Result<Option<Patient>> {
            Ok((id == 7).then(stored_patient))
        }

        async fn add_photos(
            &self,
            patient_id: i32,
            paths: Vec<String>,
            _actor: i32,
        ) -> anyhow::Result<Vec<PatientPhoto>> {
            Ok(paths
                .into_iter()
                .map(|path| PatientPhoto {
                    id: 1,
                    patient_id,
                    path,
                    created_at: Utc::now(),
                })
                .collect())
        }

        async fn soft_delete_photos(
            &self,
            _patient_id: i32,
            photo_ids: &[i32],
            _actor: i32,
        ) -> anyhow::Result<u64> {
            Ok(photo_ids.len() as u64)
        }

        async fn add_documents(
            &self,
            _patient_id: i32,
            _meta: DocumentMeta,
            _paths: Vec<String>,
            _actor: i32,
        ) -> anyhow::Result<Vec<PatientDocument>> {
            Ok(Vec::new())
        }

        async fn soft_delete_documents(
            &self,
            _patient_id: i32,
            document_ids: &[i32],
            _actor: i32,
        ) -> anyhow::Result<u64> {
            Ok(document_ids.len() as u64)
        }

        async fn list(
            &self,
            _offset: u64,
            _limit: u64,
        ) -> anyhow::Result<(Vec<PatientSummary>, u64)> {
            Ok((
                vec![PatientSummary {
                    patient: stored_patient(),
                    photos: Vec::new(),
                }],
                1,
            ))
        }

        async fn detail(&self, id: i32) -> anyhow::Result<Option<PatientDetail>> {
            Ok((id == 7).then(|| PatientDetail {
                patient: stored_patient(),
                photos: Vec::new(),
                documents: Vec::new(),
            }))
        }
    }

    fn test_app() -> (Router, String) {
        let codec = Arc::new(JwtCodec::new("patients-routes-secret", 1));
        let token = codec.sign(&admin()).unwrap();
        let auth = AuthState::new(Arc::clone(&codec), Arc::new(StaticDirectory));
        let state = PatientsState {
            service: Arc::new(PatientService::new(Arc::new(OnePatient))),
            files: FileStorage::new(std::env::temp_dir().join("patients-routes-test")),
        };
        (router(state, auth), token)
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_patient_returns_created_message() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/patient/personal-information")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "firstName": "Juan",
                            "middleName": "Ponce",
                            "lastName": "Dela Cruz",
                            "gender": "male",
                            "birthDate": "1990-05-17"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Juan Dela Cruz was successfully created");
        assert!(json["data"]["controlNo"].is_string());
    }

    #[tokio::test]
    async fn invalid_personal_information_is_rejected() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/patient/personal-information")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::json!({}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Invalid parameters, check input");
        assert_eq!(json["validationErrors"][0]["message"], "First Name is required");
    }

    #[tokio::test]
    async fn unknown_patient_detail_is_404() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/patient/99")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Patient not found.");
    }

    #[tokio::test]
    async fn patient_routes_reject_anonymous_callers() {
        let (app, _) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/patient")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_photo_id_list_is_a_validation_error() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .method("DELETE")
                    .uri("/patient/7/photo")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::json!({"photoIds": []}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = json_body(resp).await;
        assert_eq!(json["validationErrors"][0]["field"], "photoIds");
    }

    #[tokio::test]
    async fn list_wraps_patients_with_pagination() {
        let (app, token) = test_app();
        let resp = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/patient?page=1&limit=10")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["message"], "Get list of patients");
        assert_eq!(json["data"]["pagination"]["total"], 1);
        assert_eq!(json["data"]["patients"][0]["firstName"], "Juan");
    }
}
