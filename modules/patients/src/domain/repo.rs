use async_trait::async_trait;

use super::model::{
    Address, ContactInformation, DocumentMeta, Patient, PatientDetail, PatientDocument,
    PatientPhoto, PatientSummary, PersonalInformation,
};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn insert(&self, info: PersonalInformation, actor: i32) -> anyhow::Result<Patient>;

    /// Stamps the control number onto a freshly inserted row.
    async fn assign_control_no(&self, id: i32, control_no: &str) -> anyhow::Result<()>;

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Patient>>;

    async fn update_personal(
        &self,
        id: i32,
        info: PersonalInformation,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>>;

    async fn update_contact(
        &self,
        id: i32,
        info: ContactInformation,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>>;

    async fn update_address(
        &self,
        id: i32,
        address: Address,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>>;

    async fn add_photos(
        &self,
        patient_id: i32,
        paths: Vec<String>,
        actor: i32,
    ) -> anyhow::Result<Vec<PatientPhoto>>;

    /// Marks the given photos deleted; rows of other patients are untouched.
    async fn soft_delete_photos(
        &self,
        patient_id: i32,
        photo_ids: &[i32],
        actor: i32,
    ) -> anyhow::Result<u64>;

    async fn add_documents(
        &self,
        patient_id: i32,
        meta: DocumentMeta,
        paths: Vec<String>,
        actor: i32,
    ) -> anyhow::Result<Vec<PatientDocument>>;

    async fn soft_delete_documents(
        &self,
        patient_id: i32,
        document_ids: &[i32],
        actor: i32,
    ) -> anyhow::Result<u64>;

    async fn list(&self, offset: u64, limit: u64) -> anyhow::Result<(Vec<PatientSummary>, u64)>;

    /// Detail view; soft-deleted attachments are filtered out.
    async fn detail(&self, id: i32) -> anyhow::Result<Option<PatientDetail>>;
}
