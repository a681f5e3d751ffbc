use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "storefront_initial_001"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Store::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Store::Name).string().not_null())
                    .col(ColumnDef::new(Store::Logo).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Store::ContactNo)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Store::Email).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Store::Address1)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::Address2)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::StateOrProvince)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::CityOrTown)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::Barangay)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::PostalOrZip)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Store::Country)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Store::CreatedBy).integer())
                    .col(ColumnDef::new(Store::UpdatedBy).integer())
                    .col(
                        ColumnDef::new(Store::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Store::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Store {
    Table,
    Id,
    Name,
    Logo,
    ContactNo,
    Email,
    Address1,
    Address2,
    StateOrProvince,
    CityOrTown,
    Barangay,
    PostalOrZip,
    Country,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
