use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "catalog_initial_001"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Services::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Services::Logo).string().not_null())
                    .col(ColumnDef::new(Services::Category).small_integer().not_null())
                    .col(ColumnDef::new(Services::Description).string().not_null())
                    .col(ColumnDef::new(Services::Price).double().not_null())
                    .col(
                        ColumnDef::new(Services::Others)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Services::CreatedBy).integer())
                    .col(ColumnDef::new(Services::UpdatedBy).integer())
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Services::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    Logo,
    Category,
    Description,
    Price,
    Others,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
