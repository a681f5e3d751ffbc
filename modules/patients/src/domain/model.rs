use chrono::{DateTime, NaiveDate, Utc};

/// Genders accepted by the personal-information form.
pub const GENDERS: &[&str] = &["male", "female", "other"];

/// Document categories accepted on upload.
pub const DOCUMENT_TYPES: &[&str] = &["lab-result", "prescription", "medical-record", "other"];

/// Per-request attachment caps.
pub const MAX_PHOTOS_PER_UPLOAD: usize = 5;
pub const MAX_DOCUMENTS_PER_UPLOAD: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub house_no: Option<String>,
    pub street: Option<String>,
    pub city_or_town: Option<String>,
    pub province_or_region: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Patient {
    pub id: i32,
    /// `YYYYMMDD-NNNNNN`, assigned right after the first insert.
    pub control_no: Option<String>,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub mobile_no: Option<String>,
    pub email: Option<String>,
    pub address: Address,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub struct PatientPhoto {
    pub id: i32,
    pub patient_id: i32,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PatientDocument {
    pub id: i32,
    pub patient_id: i32,
    pub path: String,
    pub doc_type: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The demographic block; create and personal-information update.
#[derive(Debug, Clone)]
pub struct PersonalInformation {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ContactInformation {
    pub email: String,
    pub mobile_no: String,
}

#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub doc_type: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// A patient row together with its surviving photos.
#[derive(Debug, Clone)]
pub struct PatientSummary {
    pub patient: Patient,
    pub photos: Vec<PatientPhoto>,
}

/// Full detail: photos and documents, soft-deleted rows excluded.
#[derive(Debug, Clone)]
pub struct PatientDetail {
    pub patient: Patient,
    pub photos: Vec<PatientPhoto>,
    pub documents: Vec<PatientDocument>,
}

/// Builds the control number from the registration date and row id.
pub fn control_no(date: NaiveDate, id: i32) -> String {
    format!("{}-{:06}", date.format("%Y%m%d"), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_no_is_date_dash_padded_id() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(control_no(date, 42), "20260307-000042");
        assert_eq!(control_no(date, 1_234_567), "20260307-1234567");
    }
}
