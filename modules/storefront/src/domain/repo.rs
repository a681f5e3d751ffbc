use async_trait::async_trait;

use super::model::{StoreChanges, StoreProfile};

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Fetch the singleton store row.
    async fn read(&self) -> anyhow::Result<Option<StoreProfile>>;

    async fn update(&self, changes: StoreChanges) -> anyhow::Result<Option<StoreProfile>>;
}
