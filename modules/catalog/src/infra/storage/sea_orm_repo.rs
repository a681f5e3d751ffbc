//! `sea-orm` implementation of the catalog repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::domain::model::{NewService, ServiceChanges, ServiceItem, ServiceListFilter};
use crate::domain::repo::CatalogRepository;

use super::entities::service;

fn to_service(model: service::Model) -> ServiceItem {
    ServiceItem {
        id: model.id,
        name: model.name,
        logo: model.logo,
        category: model.category,
        description: model.description,
        price: model.price,
        others: model.others,
        created_by: model.created_by,
        updated_by: model.updated_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<ServiceItem>> {
        Ok(service::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_service))
    }

    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        let mut query = service::Entity::find().filter(service::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(service::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn insert(&self, new: NewService) -> anyhow::Result<ServiceItem> {
        let now = Utc::now();
        let model = service::ActiveModel {
            name: ActiveValue::Set(new.name),
            logo: ActiveValue::Set(new.logo),
            category: ActiveValue::Set(new.category),
            description: ActiveValue::Set(new.description),
            price: ActiveValue::Set(new.price),
            others: ActiveValue::Set(new.others),
            created_by: ActiveValue::Set(Some(new.actor)),
            updated_by: ActiveValue::Set(Some(new.actor)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_service(model))
    }

    async fn update(
        &self,
        id: i32,
        changes: ServiceChanges,
    ) -> anyhow::Result<Option<ServiceItem>> {
        let Some(existing) = service::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: service::ActiveModel = existing.into();
        model.name = ActiveValue::Set(changes.name);
        if let Some(logo) = changes.logo {
            model.logo = ActiveValue::Set(logo);
        }
        model.category = ActiveValue::Set(changes.category);
        model.description = ActiveValue::Set(changes.description);
        model.price = ActiveValue::Set(changes.price);
        model.others = ActiveValue::Set(changes.others);
        model.updated_by = ActiveValue::Set(Some(changes.actor));
        model.updated_at = ActiveValue::Set(Utc::now());
        Ok(Some(to_service(model.update(&self.db).await?)))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        service::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn list(&self, filter: ServiceListFilter) -> anyhow::Result<(Vec<ServiceItem>, u64)> {
        let mut query = service::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(service::Column::Name.contains(name));
        }
        if let Some(category) = filter.category {
            query = query.filter(service::Column::Category.eq(category));
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(service::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(to_service).collect(), total))
    }
}
