use async_trait::async_trait;

use super::model::{NewService, ServiceChanges, ServiceItem, ServiceListFilter};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<ServiceItem>>;

    /// Uniqueness probe, self-excluding on updates.
    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> anyhow::Result<bool>;

    async fn insert(&self, new: NewService) -> anyhow::Result<ServiceItem>;

    async fn update(&self, id: i32, changes: ServiceChanges)
        -> anyhow::Result<Option<ServiceItem>>;

    /// Hard delete; the price list keeps no tombstones.
    async fn delete(&self, id: i32) -> anyhow::Result<()>;

    async fn list(&self, filter: ServiceListFilter) -> anyhow::Result<(Vec<ServiceItem>, u64)>;
}
