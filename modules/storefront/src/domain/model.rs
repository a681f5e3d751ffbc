use chrono::{DateTime, Utc};

/// Id of the one and only store row, created at bootstrap.
pub const STORE_ROW_ID: i32 = 1;

/// The clinic's profile.
#[derive(Debug, Clone)]
pub struct StoreProfile {
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
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update payload. `name`, `contact_no`, and `email` are always written;
/// the rest only replace the stored value when present.
#[derive(Debug, Clone, Default)]
pub struct StoreChanges {
    pub name: String,
    pub contact_no: String,
    pub email: String,
    pub logo: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub state_or_province: Option<String>,
    pub city_or_town: Option<String>,
    pub barangay: Option<String>,
    pub postal_or_zip: Option<String>,
    pub actor: i32,
}
