use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use clinic_auth::CurrentUser;
use clinic_http::validate::ensure;
use clinic_http::{ApiError, ApiResponse, ApiResult, FileStorage, PageInfo, PageParams};

use crate::domain::model::DocumentMeta;
use crate::domain::service::PatientService;

use super::dto::{
    AddressRequest, ContactInformationRequest, DeleteDocumentsRequest, DeletePhotosRequest,
    DocumentDto, DocumentUploadForm, PatientDetailDto, PatientDto, PatientListData,
    PatientSummaryDto, PersonalInformationRequest, PhotoDto, PhotoUploadForm, UploadedFile,
};

const PATIENT_PHOTOS: &str = "patient/photos";
const PATIENT_DOCUMENTS: &str = "patient/documents";

#[derive(Clone)]
pub struct PatientsState {
    pub service: Arc<PatientService>,
    pub files: FileStorage,
}

impl PatientsState {
    async fn store_all(
        &self,
        category: &str,
        files: &[UploadedFile],
    ) -> Result<Vec<String>, ApiError> {
        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            let path = self
                .files
                .save(category, &file.name, &file.bytes)
                .await
                .map_err(|e| ApiError::Internal(e.into()))?;
            paths.push(path);
        }
        Ok(paths)
    }
}

pub async fn create_personal_information(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<PersonalInformationRequest>,
) -> ApiResult<ApiResponse<PatientDto>> {
    let info = req.validate().map_err(ApiError::Validation)?;
    let patient = state.service.register(info, &actor).await?;
    let message = format!("{} was successfully created", patient.full_name());
    Ok(ApiResponse::ok(message, patient.into()))
}

pub async fn update_personal_information(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    Json(req): Json<PersonalInformationRequest>,
) -> ApiResult<ApiResponse<PatientDto>> {
    let info = req.validate().map_err(ApiError::Validation)?;
    let patient = state
        .service
        .update_personal(patient_id, info, &actor)
        .await?;
    let message = format!("{} was successfully updated", patient.full_name());
    Ok(ApiResponse::ok(message, patient.into()))
}

pub async fn update_contact_information(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    Json(req): Json<ContactInformationRequest>,
) -> ApiResult<ApiResponse<PatientDto>> {
    let info = req.validate().map_err(ApiError::Validation)?;
    let patient = state
        .service
        .update_contact(patient_id, info, &actor)
        .await?;
    let message = format!(
        "{} contact information was successfully updated",
        patient.full_name()
    );
    Ok(ApiResponse::ok(message, patient.into()))
}

pub async fn update_address_information(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    Json(req): Json<AddressRequest>,
) -> ApiResult<ApiResponse<PatientDto>> {
    let patient = state
        .service
        .update_address(patient_id, req.into(), &actor)
        .await?;
    let message = format!(
        "{} address information was successfully updated",
        patient.full_name()
    );
    Ok(ApiResponse::ok(message, patient.into()))
}

pub async fn upload_photos(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<ApiResponse<Vec<PhotoDto>>> {
    let form = PhotoUploadForm::collect(multipart).await?;
    ensure(form.validate())?;
    state.service.ensure_exists(patient_id).await?;

    let paths = state.store_all(PATIENT_PHOTOS, &form.files).await?;
    let photos = state.service.attach_photos(patient_id, paths, &actor).await?;
    Ok(ApiResponse::ok(
        "Upload patient photo successful",
        photos.into_iter().map(PhotoDto::from).collect(),
    ))
}

pub async fn delete_photos(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    Json(req): Json<DeletePhotosRequest>,
) -> ApiResult<ApiResponse<bool>> {
    ensure(req.validate())?;
    state
        .service
        .remove_photos(patient_id, &req.photo_ids, &actor)
        .await?;
    Ok(ApiResponse::ok("Photos deleted", true))
}

pub async fn upload_documents(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<ApiResponse<Vec<DocumentDto>>> {
    let form = DocumentUploadForm::collect(multipart).await?;
    ensure(form.validate())?;
    state.service.ensure_exists(patient_id).await?;

    let paths = state.store_all(PATIENT_DOCUMENTS, &form.files).await?;
    let meta = DocumentMeta {
        doc_type: form.doc_type.unwrap_or_default(),
        description: form.description.unwrap_or_default(),
        tags: form.tags,
    };
    let documents = state
        .service
        .attach_documents(patient_id, meta, paths, &actor)
        .await?;
    Ok(ApiResponse::ok(
        "Upload patient docs successful",
        documents.into_iter().map(DocumentDto::from).collect(),
    ))
}

pub async fn delete_documents(
    State(state): State<PatientsState>,
    CurrentUser(actor): CurrentUser,
    Path(patient_id): Path<i32>,
    Json(req): Json<DeleteDocumentsRequest>,
) -> ApiResult<ApiResponse<bool>> {
    ensure(req.validate())?;
    state
        .service
        .remove_documents(patient_id, &req.document_ids, &actor)
        .await?;
    Ok(ApiResponse::ok("Documents deleted", true))
}

pub async fn list(
    State(state): State<PatientsState>,
    Query(page): Query<PageParams>,
) -> ApiResult<ApiResponse<PatientListData>> {
    let (patients, total) = state.service.list(page.offset(), page.limit()).await?;
    Ok(ApiResponse::ok(
        "Get list of patients",
        PatientListData {
            patients: patients.into_iter().map(PatientSummaryDto::from).collect(),
            pagination: PageInfo::new(total, &page),
        },
    ))
}

pub async fn detail(
    State(state): State<PatientsState>,
    Path(patient_id): Path<i32>,
) -> ApiResult<ApiResponse<PatientDetailDto>> {
    let detail = state.service.detail(patient_id).await?;
    Ok(ApiResponse::ok("Patient Details", detail.into()))
}
