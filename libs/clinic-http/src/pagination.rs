//! Pagination contract for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// `page` / `limit` query parameters; both optional with defaults.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct PageParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageParams {
    pub fn page(&self) -> u64 {
        self.page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Pagination block returned inside list payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_number_of_pages: u64,
}

impl PageInfo {
    pub fn new(total: u64, params: &PageParams) -> Self {
        let limit = params.limit();
        Self {
            total,
            page: params.page(),
            limit,
            total_number_of_pages: total.div_ceil(limit),
        }
    }
}
