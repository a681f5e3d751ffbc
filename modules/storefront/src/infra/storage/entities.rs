//! Persistence model: the singleton `store` table.

pub mod store {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "store")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub logo: String,
        pub contact_no: String,
        pub email: String,
        pub address1: String,
        pub address2: String,
        pub state_or_province: String,
        pub city_or_town: String,
        pub barangay: String,
        pub postal_or_zip: String,
        pub country: String,
        pub created_by: Option<i32>,
        pub updated_by: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
