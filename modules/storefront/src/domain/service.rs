use std::sync::Arc;

use anyhow::anyhow;
use clinic_auth::AuthUser;

use super::error::StorefrontError;
use super::model::{StoreChanges, StoreProfile};
use super::repo::StoreRepository;

pub struct StorefrontService {
    store: Arc<dyn StoreRepository>,
}

impl StorefrontService {
    pub fn new(store: Arc<dyn StoreRepository>) -> Self {
        Self { store }
    }

    /// The store row is seeded at bootstrap; a missing row is a
    /// deployment fault, not a caller error.
    pub async fn read(&self) -> Result<StoreProfile, StorefrontError> {
        self.store
            .read()
            .await?
            .ok_or_else(|| StorefrontError::Internal(anyhow!("store profile row is missing")))
    }

    pub async fn update(
        &self,
        mut changes: StoreChanges,
        actor: &AuthUser,
    ) -> Result<StoreProfile, StorefrontError> {
        changes.actor = actor.id;
        let store = self
            .store
            .update(changes)
            .await?
            .ok_or_else(|| StorefrontError::Internal(anyhow!("store profile row is missing")))?;
        tracing::info!(name = %store.name, "store profile updated");
        Ok(store)
    }
}
