//! First-boot data: the placeholder store row that every later update
//! edits in place.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::domain::model::STORE_ROW_ID;

use super::entities::store;

/// Insert the singleton store row when it does not exist yet.
pub async fn seed_store(db: &DatabaseConnection, name: &str) -> anyhow::Result<()> {
    if store::Entity::find_by_id(STORE_ROW_ID).one(db).await?.is_some() {
        return Ok(());
    }

    let now = Utc::now();
    store::ActiveModel {
        id: ActiveValue::Set(STORE_ROW_ID),
        name: ActiveValue::Set(name.to_owned()),
        logo: ActiveValue::Set(String::new()),
        contact_no: ActiveValue::Set(String::new()),
        email: ActiveValue::Set(String::new()),
        address1: ActiveValue::Set(String::new()),
        address2: ActiveValue::Set(String::new()),
        state_or_province: ActiveValue::Set(String::new()),
        city_or_town: ActiveValue::Set(String::new()),
        barangay: ActiveValue::Set(String::new()),
        postal_or_zip: ActiveValue::Set(String::new()),
        country: ActiveValue::Set("Philippines".to_owned()),
        created_by: ActiveValue::Set(None),
        updated_by: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(name, "seeded the store profile row");
    Ok(())
}
