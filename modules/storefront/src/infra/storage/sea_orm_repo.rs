//! `sea-orm` implementation of the store repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::domain::model::{StoreChanges, StoreProfile, STORE_ROW_ID};
use crate::domain::repo::StoreRepository;

use super::entities::store;

fn to_store(model: store::Model) -> StoreProfile {
    StoreProfile {
        id: model.id,
        name: model.name,
        logo: model.logo,
        contact_no: model.contact_no,
        email: model.email,
        address1: model.address1,
        address2: model.address2,
        state_or_province: model.state_or_province,
        city_or_town: model.city_or_town,
        barangay: model.barangay,
        postal_or_zip: model.postal_or_zip,
        country: model.country,
        created_by: model.created_by,
        updated_by: model.updated_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub struct SeaOrmStoreRepository {
    db: DatabaseConnection,
}

impl SeaOrmStoreRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn read(&self) -> anyhow::Result<Option<StoreProfile>> {
        Ok(store::Entity::find_by_id(STORE_ROW_ID)
            .one(&self.db)
            .await?
            .map(to_store))
    }

    async fn update(&self, changes: StoreChanges) -> anyhow::Result<Option<StoreProfile>> {
        let Some(existing) = store::Entity::find_by_id(STORE_ROW_ID).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: store::ActiveModel = existing.into();
        model.name = ActiveValue::Set(changes.name);
        model.contact_no = ActiveValue::Set(changes.contact_no);
        model.email = ActiveValue::Set(changes.email);
        if let Some(logo) = changes.logo {
            model.logo = ActiveValue::Set(logo);
        }
        if let Some(address1) = changes.address1 {
            model.address1 = ActiveValue::Set(address1);
        }
        if let Some(address2) = changes.address2 {
            model.address2 = ActiveValue::Set(address2);
        }
        if let Some(province) = changes.state_or_province {
            model.state_or_province = ActiveValue::Set(province);
        }
        if let Some(city) = changes.city_or_town {
            model.city_or_town = ActiveValue::Set(city);
        }
        if let Some(barangay) = changes.barangay {
            model.barangay = ActiveValue::Set(barangay);
        }
        if let Some(postal) = changes.postal_or_zip {
            model.postal_or_zip = ActiveValue::Set(postal);
        }
        model.updated_by = ActiveValue::Set(Some(changes.actor));
        model.updated_at = ActiveValue::Set(Utc::now());
        Ok(Some(to_store(model.update(&self.db).await?)))
    }
}
