use std::sync::Arc;

use chrono::Utc;
use clinic_auth::AuthUser;

use super::error::PatientError;
use super::model::{
    control_no, Address, ContactInformation, DocumentMeta, Patient, PatientDetail,
    PatientDocument, PatientPhoto, PatientSummary, PersonalInformation,
};
use super::repo::PatientRepository;

pub struct PatientService {
    patients: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(patients: Arc<dyn PatientRepository>) -> Self {
        Self { patients }
    }

    /// Register a patient. The control number depends on the generated row
    /// id, so it is stamped with a second write after the insert.
    pub async fn register(
        &self,
        info: PersonalInformation,
        actor: &AuthUser,
    ) -> Result<Patient, PatientError> {
        let mut patient = self.patients.insert(info, actor.id).await?;
        let assigned = control_no(Utc::now().date_naive(), patient.id);
        self.patients
            .assign_control_no(patient.id, &assigned)
            .await?;
        patient.control_no = Some(assigned);

        tracing::info!(
            patient_id = patient.id,
            control_no = patient.control_no.as_deref().unwrap_or_default(),
            "patient registered"
        );
        Ok(patient)
    }

    pub async fn update_personal(
        &self,
        id: i32,
        info: PersonalInformation,
        actor: &AuthUser,
    ) -> Result<Patient, PatientError> {
        self.patients
            .update_personal(id, info, actor.id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    pub async fn update_contact(
        &self,
        id: i32,
        info: ContactInformation,
        actor: &AuthUser,
    ) -> Result<Patient, PatientError> {
        self.patients
            .update_contact(id, info, actor.id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    pub async fn update_address(
        &self,
        id: i32,
        address: Address,
        actor: &AuthUser,
    ) -> Result<Patient, PatientError> {
        self.patients
            .update_address(id, address, actor.id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    /// Guard used by upload handlers before any bytes land on disk.
    pub async fn ensure_exists(&self, id: i32) -> Result<Patient, PatientError> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or(PatientError::NotFound)
    }

    pub async fn attach_photos(
        &self,
        patient_id: i32,
        paths: Vec<String>,
        actor: &AuthUser,
    ) -> Result<Vec<PatientPhoto>, PatientError> {
        let photos = self.patients.add_photos(patient_id, paths, actor.id).await?;
        tracing::info!(patient_id, count = photos.len(), "patient photos uploaded");
        Ok(photos)
    }

    pub async fn remove_photos(
        &self,
        patient_id: i32,
        photo_ids: &[i32],
        actor: &AuthUser,
    ) -> Result<(), PatientError> {
        self.ensure_exists(patient_id).await?;
        let removed = self
            .patients
            .soft_delete_photos(patient_id, photo_ids, actor.id)
            .await?;
        tracing::info!(patient_id, removed, "patient photos deleted");
        Ok(())
    }

    pub async fn attach_documents(
        &self,
        patient_id: i32,
        meta: DocumentMeta,
        paths: Vec<String>,
        actor: &AuthUser,
    ) -> Result<Vec<PatientDocument>, PatientError> {
        let documents = self
            .patients
            .add_documents(patient_id, meta, paths, actor.id)
            .await?;
        tracing::info!(
            patient_id,
            count = documents.len(),
            "patient documents uploaded"
        );
        Ok(documents)
    }

    pub async fn remove_documents(
        &self,
        patient_id: i32,
        document_ids: &[i32],
        actor: &AuthUser,
    ) -> Result<(), PatientError> {
        self.ensure_exists(patient_id).await?;
        let removed = self
            .patients
            .soft_delete_documents(patient_id, document_ids, actor.id)
            .await?;
        tracing::info!(patient_id, removed, "patient documents deleted");
        Ok(())
    }

    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<PatientSummary>, u64), PatientError> {
        Ok(self.patients.list(offset, limit).await?)
    }

    pub async fn detail(&self, id: i32) -> Result<PatientDetail, PatientError> {
        self.patients
            .detail(id)
            .await?
            .ok_or(PatientError::NotFound)
    }
}
