//! First-boot data: the four staff roles and the two administrator accounts.

use chrono::Utc;
use clinic_auth::{
    password, ROLE_CASHIER, ROLE_PMS_ADMIN, ROLE_RECEPTION, ROLE_SUPER_ADMIN,
};
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use super::entities::{role, user, user_role};

/// Bootstrap account taken from configuration.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

async fn insert_user(
    db: &sea_orm::DatabaseConnection,
    admin: &SeedAdmin,
    role_name: &str,
    created_by: Option<i32>,
    bcrypt_cost: u32,
) -> anyhow::Result<user::Model> {
    let role = role::Entity::find()
        .filter(role::Column::Name.eq(role_name))
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("seed role {role_name} missing"))?;

    let now = Utc::now();
    let model = user::ActiveModel {
        first_name: ActiveValue::Set(admin.first_name.clone()),
        last_name: ActiveValue::Set(admin.last_name.clone()),
        email: ActiveValue::Set(admin.email.clone()),
        password: ActiveValue::Set(password::hash_password(&admin.password, bcrypt_cost)?),
        active: ActiveValue::Set(true),
        created_by: ActiveValue::Set(created_by),
        updated_by: ActiveValue::Set(created_by),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    user_role::ActiveModel {
        user_id: ActiveValue::Set(model.id),
        role_id: ActiveValue::Set(role.id),
    }
    .insert(db)
    .await?;

    Ok(model)
}

/// Insert the staff roles and the two bootstrap admins. The caller guards
/// against re-running this on an already seeded database.
pub async fn seed_identities(
    db: &sea_orm::DatabaseConnection,
    super_admin: &SeedAdmin,
    pms_admin: &SeedAdmin,
    bcrypt_cost: u32,
) -> anyhow::Result<()> {
    for name in [
        ROLE_SUPER_ADMIN,
        ROLE_PMS_ADMIN,
        ROLE_CASHIER,
        ROLE_RECEPTION,
    ] {
        role::ActiveModel {
            name: ActiveValue::Set(name.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    let root = insert_user(db, super_admin, ROLE_SUPER_ADMIN, None, bcrypt_cost).await?;
    insert_user(db, pms_admin, ROLE_PMS_ADMIN, Some(root.id), bcrypt_cost).await?;

    tracing::info!(
        super_admin = %super_admin.email,
        pms_admin = %pms_admin.email,
        "seeded staff roles and bootstrap accounts"
    );
    Ok(())
}
