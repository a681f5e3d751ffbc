//! Persistence models: `patients`, `patient_photos`, `patient_documents`.

pub mod patient {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "patients")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub control_no: Option<String>,
        pub first_name: String,
        pub middle_name: String,
        pub last_name: String,
        pub gender: String,
        pub birth_date: Date,
        pub mobile_no: Option<String>,
        pub email: Option<String>,
        pub house_no: Option<String>,
        pub street: Option<String>,
        pub city_or_town: Option<String>,
        pub province_or_region: Option<String>,
        pub postal: Option<String>,
        pub country: Option<String>,
        pub deleted: bool,
        pub created_by: Option<i32>,
        pub updated_by: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::photo::Entity")]
        Photos,
        #[sea_orm(has_many = "super::document::Entity")]
        Documents,
    }

    impl Related<super::photo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Photos.def()
        }
    }

    impl Related<super::document::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Documents.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod photo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "patient_photos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub patient_id: i32,
        pub path: String,
        pub deleted: bool,
        pub created_by: Option<i32>,
        pub updated_by: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::patient::Entity",
            from = "Column::PatientId",
            to = "super::patient::Column::Id"
        )]
        Patient,
    }

    impl Related<super::patient::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Patient.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod document {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "patient_documents")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub patient_id: i32,
        pub path: String,
        #[sea_orm(column_name = "type")]
        pub doc_type: String,
        pub description: String,
        /// Comma-joined tag list.
        pub tags: String,
        pub deleted: bool,
        pub created_by: Option<i32>,
        pub updated_by: Option<i32>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::patient::Entity",
            from = "Column::PatientId",
            to = "super::patient::Column::Id"
        )]
        Patient,
    }

    impl Related<super::patient::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Patient.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
