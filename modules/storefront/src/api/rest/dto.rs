use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use clinic_http::{ApiError, FieldError};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::model::{StoreChanges, StoreProfile};

#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The store update form; `multipart/form-data` because it may carry a
/// logo image.
#[derive(Debug, Default)]
pub struct StoreForm {
    pub name: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub state_or_province: Option<String>,
    pub city_or_town: Option<String>,
    pub barangay: Option<String>,
    pub postal_or_zip: Option<String>,
    pub logo: Option<UploadedFile>,
}

impl StoreForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == "logo" {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                if !bytes.is_empty() {
                    form.logo = Some(UploadedFile {
                        name: file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                match name.as_str() {
                    "name" => form.name = Some(value),
                    "contactNo" => form.contact_no = Some(value),
                    "email" => form.email = Some(value),
                    "address1" => form.address1 = Some(value),
                    "address2" => form.address2 = Some(value),
                    "stateOrProvince" => form.state_or_province = Some(value),
                    "cityOrTown" => form.city_or_town = Some(value),
                    "barangay" => form.barangay = Some(value),
                    "postalOrZip" => form.postal_or_zip = Some(value),
                    _ => {}
                }
            }
        }
        Ok(form)
    }

    /// `logo` is left unset; the handler fills in the path once the
    /// upload lands on disk.
    pub fn validate(&self) -> Result<StoreChanges, Vec<FieldError>> {
        let mut errors = Vec::new();

        let required = |value: &Option<String>| match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_owned()),
            _ => None,
        };

        let name = required(&self.name);
        if name.is_none() {
            errors.push(FieldError::new("name", "Store name is required"));
        }
        let contact_no = required(&self.contact_no);
        if contact_no.is_none() {
            errors.push(FieldError::new("contactNo", "Contact number is required."));
        }
        let email = required(&self.email);
        if email.is_none() {
            errors.push(FieldError::new("email", "Email is required."));
        }

        match (name, contact_no, email) {
            (Some(name), Some(contact_no), Some(email)) => Ok(StoreChanges {
                name,
                contact_no,
                email,
                logo: None,
                address1: required(&self.address1),
                address2: required(&self.address2),
                state_or_province: required(&self.state_or_province),
                city_or_town: required(&self.city_or_town),
                barangay: required(&self.barangay),
                postal_or_zip: required(&self.postal_or_zip),
                actor: 0,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub contact_no: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub state_or_province: String,
    pub city_or_town: String,
    pub barangay: String,
    pub postal_or_zip: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreProfile> for StoreDto {
    fn from(s: StoreProfile) -> Self {
        Self {
            id: s.id,
            name: s.name,
            logo: s.logo,
            contact_no: s.contact_no,
            email: s.email,
            address1: s.address1,
            address2: s.address2,
            state_or_province: s.state_or_province,
            city_or_town: s.city_or_town,
            barangay: s.barangay,
            postal_or_zip: s.postal_or_zip,
            country: s.country,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreData {
    pub store: StoreDto,
}
