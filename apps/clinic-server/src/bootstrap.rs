//! Database bootstrap: the aggregate migrator, the `system` marker row,
//! and idempotent first-boot seeding.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};
use sea_orm_migration::prelude::*;
use sea_orm_migration::MigratorTrait;

use crate::config::AppConfig;

pub mod system {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "system")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub app_name: String,
        pub seeded: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

const SYSTEM_ROW_ID: i32 = 1;

struct SystemMigration;

impl MigrationName for SystemMigration {
    fn name(&self) -> &str {
        "system_initial_001"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for SystemMigration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(System::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(System::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(System::AppName).string().not_null())
                    .col(
                        ColumnDef::new(System::Seeded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(System::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum System {
    Table,
    Id,
    AppName,
    Seeded,
}

/// All module schemas plus the `system` marker table, applied in order
/// against the one shared database.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        let mut all = directory::migrations();
        all.extend(patients::migrations());
        all.extend(catalog::migrations());
        all.extend(storefront::migrations());
        all.push(Box::new(SystemMigration));
        all
    }
}

/// Apply pending migrations, then seed roles, bootstrap admins, and the
/// store row exactly once. The `system.seeded` flag guards re-runs.
pub async fn prepare_database(db: &DatabaseConnection, config: &AppConfig) -> anyhow::Result<()> {
    Migrator::up(db, None).await?;

    let marker = system::Entity::find_by_id(SYSTEM_ROW_ID).one(db).await?;
    if marker.as_ref().is_some_and(|m| m.seeded) {
        tracing::debug!("database already seeded, skipping bootstrap data");
        return Ok(());
    }

    let (super_admin, pms_admin) = config.seed_accounts()?;
    directory::seed_identities(db, &super_admin, &pms_admin, config.auth.bcrypt_cost).await?;
    storefront::seed_store(db, &config.seed.store_name).await?;

    match marker {
        Some(existing) => {
            let mut model: system::ActiveModel = existing.into();
            model.seeded = ActiveValue::Set(true);
            model.update(db).await?;
        }
        None => {
            system::ActiveModel {
                id: ActiveValue::Set(SYSTEM_ROW_ID),
                app_name: ActiveValue::Set(config.seed.store_name.clone()),
                seeded: ActiveValue::Set(true),
            }
            .insert(db)
            .await?;
        }
    }

    Ok(())
}
