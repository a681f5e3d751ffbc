//! Patient DTOs. Demographic updates are JSON; attachments arrive as
//! `multipart/form-data`.

use axum::extract::Multipart;
use chrono::{DateTime, NaiveDate, Utc};
use clinic_http::validate::is_valid_email;
use clinic_http::{ApiError, FieldError, PageInfo};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{
    Address, ContactInformation, Patient, PatientDetail, PatientDocument, PatientPhoto,
    PatientSummary, PersonalInformation, DOCUMENT_TYPES, GENDERS, MAX_DOCUMENTS_PER_UPLOAD,
    MAX_PHOTOS_PER_UPLOAD,
};

const PHOTO_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birth_date: String,
}

impl PersonalInformationRequest {
    /// All fields mandatory; gender and birth date must parse.
    pub fn validate(&self) -> Result<PersonalInformation, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("firstName", "First Name is required"));
        }
        if self.middle_name.trim().is_empty() {
            errors.push(FieldError::new("middleName", "Middle Name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("lastName", "Last Name is required"));
        }

        let gender = self.gender.trim().to_lowercase();
        if gender.is_empty() {
            errors.push(FieldError::new("gender", "Gender is required"));
        } else if !GENDERS.contains(&gender.as_str()) {
            errors.push(FieldError::new(
                "gender",
                "gender must be 'male', 'female', or 'other'",
            ));
        }

        let birth_date = if self.birth_date.trim().is_empty() {
            errors.push(FieldError::new("birthDate", "Birth Date is required"));
            None
        } else {
            match NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError::new("birthDate", "Provide a valid birth date"));
                    None
                }
            }
        };

        match (errors.is_empty(), birth_date) {
            (true, Some(birth_date)) => Ok(PersonalInformation {
                first_name: self.first_name.trim().to_owned(),
                middle_name: self.middle_name.trim().to_owned(),
                last_name: self.last_name.trim().to_owned(),
                gender,
                birth_date,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformationRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile_no: String,
}

impl ContactInformationRequest {
    pub fn validate(&self) -> Result<ContactInformation, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Provide a valid email"));
        }
        if self.mobile_no.trim().is_empty() {
            errors.push(FieldError::new("mobileNo", "Mobile Number is required"));
        }

        if errors.is_empty() {
            Ok(ContactInformation {
                email: self.email.trim().to_owned(),
                mobile_no: self.mobile_no.trim().to_owned(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Every address field is optional; omitted fields are stored empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub house_no: Option<String>,
    pub street: Option<String>,
    pub city_or_town: Option<String>,
    pub province_or_region: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
}

impl From<AddressRequest> for Address {
    fn from(req: AddressRequest) -> Self {
        Self {
            house_no: req.house_no,
            street: req.street,
            city_or_town: req.city_or_town,
            province_or_region: req.province_or_region,
            postal: req.postal,
            country: req.country,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePhotosRequest {
    #[serde(default)]
    pub photo_ids: Vec<i32>,
}

impl DeletePhotosRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        if self.photo_ids.is_empty() {
            vec![FieldError::new("photoIds", "photoIds should not be empty")]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocumentsRequest {
    #[serde(default)]
    pub document_ids: Vec<i32>,
}

impl DeleteDocumentsRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        if self.document_ids.is_empty() {
            vec![FieldError::new(
                "documentIds",
                "documentIds should not be empty",
            )]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

async fn collect_files(
    multipart: &mut Multipart,
    form: &mut Vec<UploadedFile>,
    extra: &mut impl FnMut(&str, String),
) -> Result<(), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == "files" {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
            if !bytes.is_empty() {
                form.push(UploadedFile {
                    name: file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
            extra(&name, value);
        }
    }
    Ok(())
}

/// `files` fields of the photo upload form.
#[derive(Debug, Default)]
pub struct PhotoUploadForm {
    pub files: Vec<UploadedFile>,
}

impl PhotoUploadForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        collect_files(&mut multipart, &mut form.files, &mut |_, _| {}).await?;
        Ok(form)
    }

    /// Non-empty, within the per-upload cap, and image mime types only.
    pub fn validate(&self) -> Vec<FieldError> {
        let ok = !self.files.is_empty()
            && self.files.len() <= MAX_PHOTOS_PER_UPLOAD
            && self.files.iter().all(|f| {
                f.content_type
                    .as_deref()
                    .is_some_and(|ct| PHOTO_MIME_TYPES.contains(&ct))
            });
        if ok {
            Vec::new()
        } else {
            vec![FieldError::new("files", "Invalid patient photos")]
        }
    }
}

/// The document upload form: `files` plus `type`, `description`, `tags`.
#[derive(Debug, Default)]
pub struct DocumentUploadForm {
    pub files: Vec<UploadedFile>,
    pub doc_type: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl DocumentUploadForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut files = Vec::new();
        let mut doc_type = None;
        let mut description = None;
        let mut tags: Vec<String> = Vec::new();
        collect_files(&mut multipart, &mut files, &mut |name, value| match name {
            "type" => doc_type = Some(value),
            "description" => description = Some(value),
            "tags" => tags.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
            ),
            _ => {}
        })
        .await?;
        Ok(Self {
            files,
            doc_type,
            description,
            tags,
        })
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self.doc_type.as_deref().map(str::trim) {
            None | Some("") => errors.push(FieldError::new("type", "Category is required")),
            Some(t) if !DOCUMENT_TYPES.contains(&t) => {
                errors.push(FieldError::new("type", "Type is invalid"));
            }
            _ => {}
        }
        if self
            .description
            .as_deref()
            .is_none_or(|d| d.trim().is_empty())
        {
            errors.push(FieldError::new("description", "Description is required"));
        }
        if self.tags.is_empty() {
            errors.push(FieldError::new("tags", "Tags is required"));
        }
        if self.files.is_empty() || self.files.len() > MAX_DOCUMENTS_PER_UPLOAD {
            errors.push(FieldError::new("files", "Invalid patient docs"));
        }
        errors
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDto {
    pub id: i32,
    pub control_no: Option<String>,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub mobile_no: Option<String>,
    pub email: Option<String>,
    pub house_no: Option<String>,
    pub street: Option<String>,
    pub city_or_town: Option<String>,
    pub province_or_region: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Patient> for PatientDto {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            control_no: p.control_no,
            first_name: p.first_name,
            middle_name: p.middle_name,
            last_name: p.last_name,
            gender: p.gender,
            birth_date: p.birth_date,
            mobile_no: p.mobile_no,
            email: p.email,
            house_no: p.address.house_no,
            street: p.address.street,
            city_or_town: p.address.city_or_town,
            province_or_region: p.address.province_or_region,
            postal: p.address.postal,
            country: p.address.country,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDto {
    pub id: i32,
    pub patient_id: i32,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl From<PatientPhoto> for PhotoDto {
    fn from(p: PatientPhoto) -> Self {
        Self {
            id: p.id,
            patient_id: p.patient_id,
            path: p.path,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub id: i32,
    pub patient_id: i32,
    pub path: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PatientDocument> for DocumentDto {
    fn from(d: PatientDocument) -> Self {
        Self {
            id: d.id,
            patient_id: d.patient_id,
            path: d.path,
            doc_type: d.doc_type,
            description: d.description,
            tags: d.tags,
            created_at: d.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientSummaryDto {
    #[serde(flatten)]
    pub patient: PatientDto,
    pub photos: Vec<PhotoDto>,
}

impl From<PatientSummary> for PatientSummaryDto {
    fn from(s: PatientSummary) -> Self {
        Self {
            patient: s.patient.into(),
            photos: s.photos.into_iter().map(PhotoDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientDetailDto {
    #[serde(flatten)]
    pub patient: PatientDto,
    pub photos: Vec<PhotoDto>,
    pub documents: Vec<DocumentDto>,
}

impl From<PatientDetail> for PatientDetailDto {
    fn from(d: PatientDetail) -> Self {
        Self {
            patient: d.patient.into(),
            photos: d.photos.into_iter().map(PhotoDto::from).collect(),
            documents: d.documents.into_iter().map(DocumentDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientListData {
    pub patients: Vec<PatientSummaryDto>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn empty_personal_information_reports_every_field() {
        let req = PersonalInformationRequest {
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            gender: String::new(),
            birth_date: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["firstName", "middleName", "lastName", "gender", "birthDate"]
        );
    }

    #[test]
    fn gender_is_case_insensitive_but_closed() {
        let mut req = PersonalInformationRequest {
            first_name: "Juan".into(),
            middle_name: "Ponce".into(),
            last_name: "Dela Cruz".into(),
            gender: "Male".into(),
            birth_date: "1990-05-17".into(),
        };
        let info = req.validate().unwrap();
        assert_eq!(info.gender, "male");

        req.gender = "unknown".into();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors[0].message,
            "gender must be 'male', 'female', or 'other'"
        );
    }

    #[test]
    fn malformed_birth_date_is_rejected() {
        let req = PersonalInformationRequest {
            first_name: "Juan".into(),
            middle_name: "Ponce".into(),
            last_name: "Dela Cruz".into(),
            gender: "male".into(),
            birth_date: "17/05/1990".into(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].message, "Provide a valid birth date");
    }

    #[test]
    fn photo_upload_rejects_wrong_mime_and_overflow() {
        let photo = |ct: &str| UploadedFile {
            name: "a.jpg".into(),
            content_type: Some(ct.into()),
            bytes: vec![1],
        };

        let pdf = PhotoUploadForm {
            files: vec![photo("application/pdf")],
        };
        assert_eq!(pdf.validate()[0].message, "Invalid patient photos");

        let over = PhotoUploadForm {
            files: (0..6).map(|_| photo("image/png")).collect(),
        };
        assert!(!over.validate().is_empty());

        let ok = PhotoUploadForm {
            files: vec![photo("image/jpeg")],
        };
        assert!(ok.validate().is_empty());
    }

    #[test]
    fn document_upload_requires_metadata() {
        let form = DocumentUploadForm::default();
        let errors = form.validate();
        assert_eq!(fields(&errors), vec!["type", "description", "tags", "files"]);
    }

    #[test]
    fn unknown_document_category_is_invalid() {
        let form = DocumentUploadForm {
            files: vec![UploadedFile {
                name: "a.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: vec![1],
            }],
            doc_type: Some("selfie".into()),
            description: Some("notes".into()),
            tags: vec!["x".into()],
        };
        assert_eq!(form.validate()[0].message, "Type is invalid");
    }
}
