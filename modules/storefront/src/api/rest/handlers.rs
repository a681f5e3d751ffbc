use std::sync::Arc;

use axum::extract::{Multipart, State};
use clinic_auth::CurrentUser;
use clinic_http::{ApiError, ApiResponse, ApiResult, FileStorage};

use crate::domain::service::StorefrontService;

use super::dto::{StoreData, StoreForm};

const STORE_FILES: &str = "store";

#[derive(Clone)]
pub struct StorefrontState {
    pub service: Arc<StorefrontService>,
    pub files: FileStorage,
}

pub async fn read_store(
    State(state): State<StorefrontState>,
) -> ApiResult<ApiResponse<StoreData>> {
    let store = state.service.read().await?;
    Ok(ApiResponse::ok(
        "Store Details",
        StoreData {
            store: store.into(),
        },
    ))
}

pub async fn update_store(
    State(state): State<StorefrontState>,
    CurrentUser(actor): CurrentUser,
    multipart: Multipart,
) -> ApiResult<ApiResponse<()>> {
    let form = StoreForm::collect(multipart).await?;
    // Required-field checks run before the logo touches disk.
    let mut changes = form.validate().map_err(ApiError::Validation)?;

    if let Some(file) = &form.logo {
        let path = state
            .files
            .save(STORE_FILES, &file.name, &file.bytes)
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        changes.logo = Some(path);
    }

    state.service.update(changes, &actor).await?;
    Ok(ApiResponse::message("Store successfully updated."))
}
