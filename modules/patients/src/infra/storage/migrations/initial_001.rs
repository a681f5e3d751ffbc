use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "patients_initial_001"
    }
}

fn audit_columns(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(ColumnDef::new(Audit::CreatedBy).integer())
        .col(ColumnDef::new(Audit::UpdatedBy).integer())
        .col(
            ColumnDef::new(Audit::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Audit::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut patients = Table::create()
            .table(Patients::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Patients::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Patients::ControlNo).string())
            .col(ColumnDef::new(Patients::FirstName).string().not_null())
            .col(ColumnDef::new(Patients::MiddleName).string().not_null())
            .col(ColumnDef::new(Patients::LastName).string().not_null())
            .col(ColumnDef::new(Patients::Gender).string().not_null())
            .col(ColumnDef::new(Patients::BirthDate).date().not_null())
            .col(ColumnDef::new(Patients::MobileNo).string())
            .col(ColumnDef::new(Patients::Email).string())
            .col(ColumnDef::new(Patients::HouseNo).string())
            .col(ColumnDef::new(Patients::Street).string())
            .col(ColumnDef::new(Patients::CityOrTown).string())
            .col(ColumnDef::new(Patients::ProvinceOrRegion).string())
            .col(ColumnDef::new(Patients::Postal).string())
            .col(ColumnDef::new(Patients::Country).string())
            .col(
                ColumnDef::new(Patients::Deleted)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned();
        audit_columns(&mut patients);
        manager.create_table(patients).await?;

        let mut photos = Table::create()
            .table(PatientPhotos::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(PatientPhotos::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PatientPhotos::PatientId).integer().not_null())
            .col(ColumnDef::new(PatientPhotos::Path).string().not_null())
            .col(
                ColumnDef::new(PatientPhotos::Deleted)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(PatientPhotos::Table, PatientPhotos::PatientId)
                    .to(Patients::Table, Patients::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        audit_columns(&mut photos);
        manager.create_table(photos).await?;

        let mut documents = Table::create()
            .table(PatientDocuments::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(PatientDocuments::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(PatientDocuments::PatientId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(PatientDocuments::Path).string().not_null())
            .col(ColumnDef::new(PatientDocuments::Type).string().not_null())
            .col(
                ColumnDef::new(PatientDocuments::Description)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(PatientDocuments::Tags).string().not_null())
            .col(
                ColumnDef::new(PatientDocuments::Deleted)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(PatientDocuments::Table, PatientDocuments::PatientId)
                    .to(Patients::Table, Patients::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        audit_columns(&mut documents);
        manager.create_table(documents).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PatientDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PatientPhotos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Audit {
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Patients {
    Table,
    Id,
    ControlNo,
    FirstName,
    MiddleName,
    LastName,
    Gender,
    BirthDate,
    MobileNo,
    Email,
    HouseNo,
    Street,
    CityOrTown,
    ProvinceOrRegion,
    Postal,
    Country,
    Deleted,
}

#[derive(DeriveIden)]
enum PatientPhotos {
    Table,
    Id,
    PatientId,
    Path,
    Deleted,
}

#[derive(DeriveIden)]
enum PatientDocuments {
    Table,
    Id,
    PatientId,
    Path,
    Type,
    Description,
    Tags,
    Deleted,
}
