use std::sync::Arc;

use super::error::CatalogError;
use super::model::{NewService, ServiceChanges, ServiceItem, ServiceListFilter};
use super::repo::CatalogRepository;

pub struct CatalogService {
    services: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(services: Arc<dyn CatalogRepository>) -> Self {
        Self { services }
    }

    pub async fn create(&self, new: NewService) -> Result<ServiceItem, CatalogError> {
        if self.services.name_in_use(&new.name, None).await? {
            return Err(CatalogError::field("name", "Service name is already used"));
        }
        let service = self.services.insert(new).await?;
        tracing::info!(service_id = service.id, name = %service.name, "service created");
        Ok(service)
    }

    pub async fn get(&self, id: i32) -> Result<ServiceItem, CatalogError> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: ServiceChanges,
    ) -> Result<ServiceItem, CatalogError> {
        if self.services.name_in_use(&changes.name, Some(id)).await? {
            return Err(CatalogError::field("name", "Service name is already used"));
        }
        self.services
            .update(id, changes)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn delete(&self, id: i32) -> Result<ServiceItem, CatalogError> {
        let service = self
            .services
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound)?;
        self.services.delete(id).await?;
        tracing::info!(service_id = id, name = %service.name, "service deleted");
        Ok(service)
    }

    pub async fn list(
        &self,
        filter: ServiceListFilter,
    ) -> Result<(Vec<ServiceItem>, u64), CatalogError> {
        Ok(self.services.list(filter).await?)
    }
}
