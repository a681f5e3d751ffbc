use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use clinic_auth::CurrentUser;
use clinic_http::{ApiError, ApiResponse, ApiResult, FileStorage, PageInfo};

use crate::domain::model::{NewService, ServiceChanges, ServiceListFilter};
use crate::domain::service::CatalogService;

use super::dto::{ServiceDto, ServiceForm, ServiceListData, ServiceListQuery, UploadedFile};

const SERVICE_LOGOS: &str = "service-logos";

#[derive(Clone)]
pub struct CatalogState {
    pub service: Arc<CatalogService>,
    pub files: FileStorage,
}

impl CatalogState {
    async fn store_logo(&self, logo: &UploadedFile) -> Result<String, ApiError> {
        self.files
            .save(SERVICE_LOGOS, &logo.name, &logo.bytes)
            .await
            .map_err(|e| ApiError::Internal(e.into()))
    }
}

pub async fn create_service(
    State(state): State<CatalogState>,
    CurrentUser(actor): CurrentUser,
    multipart: Multipart,
) -> ApiResult<ApiResponse<ServiceDto>> {
    let form = ServiceForm::collect(multipart).await?;
    let fields = form.validate(true).map_err(ApiError::Validation)?;
    let logo = match &form.logo {
        Some(file) => state.store_logo(file).await?,
        None => return Err(ApiError::Rule("Invalid parameters, check input".into())),
    };

    let service = state
        .service
        .create(NewService {
            name: fields.name,
            logo,
            category: fields.category,
            description: fields.description,
            price: fields.price,
            others: fields.others,
            actor: actor.id,
        })
        .await?;
    let message = format!("{} was successfully created", service.name);
    Ok(ApiResponse::ok(message, service.into()))
}

pub async fn read_service(
    State(state): State<CatalogState>,
    Path(service_id): Path<i32>,
) -> ApiResult<ApiResponse<ServiceDto>> {
    let service = state.service.get(service_id).await?;
    Ok(ApiResponse::ok("Service", service.into()))
}

pub async fn update_service(
    State(state): State<CatalogState>,
    CurrentUser(actor): CurrentUser,
    Path(service_id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<ApiResponse<ServiceDto>> {
    let form = ServiceForm::collect(multipart).await?;
    let fields = form.validate(false).map_err(ApiError::Validation)?;
    let logo = match &form.logo {
        Some(file) => Some(state.store_logo(file).await?),
        None => None,
    };

    let service = state
        .service
        .update(
            service_id,
            ServiceChanges {
                name: fields.name,
                logo,
                category: fields.category,
                description: fields.description,
                price: fields.price,
                others: fields.others,
                actor: actor.id,
            },
        )
        .await?;
    let message = format!("{} was successfully updated.", service.name);
    Ok(ApiResponse::ok(message, service.into()))
}

pub async fn delete_service(
    State(state): State<CatalogState>,
    Path(service_id): Path<i32>,
) -> ApiResult<ApiResponse<ServiceDto>> {
    let service = state.service.delete(service_id).await?;
    let message = format!("{} successfully deleted.", service.name);
    Ok(ApiResponse::ok(message, service.into()))
}

pub async fn list_services(
    State(state): State<CatalogState>,
    Query(query): Query<ServiceListQuery>,
) -> ApiResult<ApiResponse<ServiceListData>> {
    let filter = ServiceListFilter {
        name: query.name.clone(),
        category: query.category,
        offset: query.page().offset(),
        limit: query.page().limit(),
    };
    let (services, total) = state.service.list(filter).await?;
    Ok(ApiResponse::ok(
        "List of services offered.",
        ServiceListData {
            services: services.into_iter().map(ServiceDto::from).collect(),
            pagination: PageInfo::new(total, &query.page()),
        },
    ))
}
