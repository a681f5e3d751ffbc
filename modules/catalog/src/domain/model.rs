use chrono::{DateTime, Utc};

/// One offered service on the price list.
#[derive(Debug, Clone)]
pub struct ServiceItem {
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub category: i16,
    pub description: String,
    pub price: f64,
    pub others: String,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub logo: String,
    pub category: i16,
    pub description: String,
    pub price: f64,
    pub others: String,
    pub actor: i32,
}

/// Update payload; `logo: None` keeps the stored file.
#[derive(Debug, Clone)]
pub struct ServiceChanges {
    pub name: String,
    pub logo: Option<String>,
    pub category: i16,
    pub description: String,
    pub price: f64,
    pub others: String,
    pub actor: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceListFilter {
    /// Substring match on the service name.
    pub name: Option<String>,
    /// Exact category match.
    pub category: Option<i16>,
    pub offset: u64,
    pub limit: u64,
}
