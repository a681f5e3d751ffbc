//! Wires the modules together: one database connection, one auth state,
//! one router under `/v1`.

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Json, Router};
use clinic_auth::{AuthState, JwtCodec, UserDirectory};
use clinic_http::{audit, FieldError, FileStorage, PageInfo};
use sea_orm::{Database, DatabaseConnection};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;

use catalog::{CatalogService, CatalogState, SeaOrmCatalogRepository};
use directory::{DirectoryService, DirectoryState, SeaOrmRoleRepository, SeaOrmUserRepository};
use patients::{PatientService, PatientsState, SeaOrmPatientRepository};
use storefront::{SeaOrmStoreRepository, StorefrontService, StorefrontState};

use crate::bootstrap;
use crate::config::AppConfig;

/// Generous enough for a batch of patient document uploads.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clinic PMS API",
        description = "Patient-management backend: staff directory, patient records, price list, and store profile."
    ),
    components(schemas(FieldError, PageInfo))
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(db: DatabaseConnection, config: &AppConfig) -> Router {
    let codec = Arc::new(JwtCodec::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_hours,
    ));
    let files = FileStorage::new(&config.uploads.root_dir);

    let directory_service = Arc::new(DirectoryService::new(
        Arc::new(SeaOrmUserRepository::new(db.clone())),
        Arc::new(SeaOrmRoleRepository::new(db.clone())),
        Arc::clone(&codec),
        config.auth.bcrypt_cost,
    ));
    // The directory doubles as the guard's user lookup.
    let auth = AuthState::new(
        codec,
        Arc::clone(&directory_service) as Arc<dyn UserDirectory>,
    );

    let patient_service = Arc::new(PatientService::new(Arc::new(SeaOrmPatientRepository::new(
        db.clone(),
    ))));
    let catalog_service = Arc::new(CatalogService::new(Arc::new(SeaOrmCatalogRepository::new(
        db.clone(),
    ))));
    let storefront_service = Arc::new(StorefrontService::new(Arc::new(
        SeaOrmStoreRepository::new(db),
    )));

    let api = Router::new()
        .merge(directory::router(
            DirectoryState {
                service: directory_service,
                files: files.clone(),
            },
            auth.clone(),
        ))
        .merge(patients::router(
            PatientsState {
                service: patient_service,
                files: files.clone(),
            },
            auth.clone(),
        ))
        .merge(catalog::router(
            CatalogState {
                service: catalog_service,
                files: files.clone(),
            },
            auth.clone(),
        ))
        .merge(storefront::router(
            StorefrontState {
                service: storefront_service,
                files,
            },
            auth,
        ));

    Router::new()
        .nest("/v1", api)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(audit::audit_log))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database.url).await?;
    bootstrap::prepare_database(&db, &config).await?;

    let router = build_router(db, &config);
    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "clinic server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
