//! `sea-orm` implementation of the patient repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::domain::model::{
    Address, ContactInformation, DocumentMeta, Patient, PatientDetail, PatientDocument,
    PatientPhoto, PatientSummary, PersonalInformation,
};
use crate::domain::repo::PatientRepository;

use super::entities::{document, patient, photo};

fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn to_patient(model: patient::Model) -> Patient {
    Patient {
        id: model.id,
        control_no: model.control_no,
        first_name: model.first_name,
        middle_name: model.middle_name,
        last_name: model.last_name,
        gender: model.gender,
        birth_date: model.birth_date,
        mobile_no: model.mobile_no,
        email: model.email,
        address: Address {
            house_no: model.house_no,
            street: model.street,
            city_or_town: model.city_or_town,
            province_or_region: model.province_or_region,
            postal: model.postal,
            country: model.country,
        },
        created_by: model.created_by,
        updated_by: model.updated_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn to_photo(model: photo::Model) -> PatientPhoto {
    PatientPhoto {
        id: model.id,
        patient_id: model.patient_id,
        path: model.path,
        created_at: model.created_at,
    }
}

fn to_document(model: document::Model) -> PatientDocument {
    PatientDocument {
        id: model.id,
        patient_id: model.patient_id,
        path: model.path,
        doc_type: model.doc_type,
        description: model.description,
        tags: split_tags(&model.tags),
        created_at: model.created_at,
    }
}

pub struct SeaOrmPatientRepository {
    db: DatabaseConnection,
}

impl SeaOrmPatientRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn apply_update<F>(&self, id: i32, actor: i32, set: F) -> anyhow::Result<Option<Patient>>
    where
        F: FnOnce(&mut patient::ActiveModel),
    {
        let Some(existing) = patient::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: patient::ActiveModel = existing.into();
        set(&mut model);
        model.updated_by = ActiveValue::Set(Some(actor));
        model.updated_at = ActiveValue::Set(Utc::now());
        Ok(Some(to_patient(model.update(&self.db).await?)))
    }
}

#[async_trait]
impl PatientRepository for SeaOrmPatientRepository {
    async fn insert(&self, info: PersonalInformation, actor: i32) -> anyhow::Result<Patient> {
        let now = Utc::now();
        let model = patient::ActiveModel {
            first_name: ActiveValue::Set(info.first_name),
            middle_name: ActiveValue::Set(info.middle_name),
            last_name: ActiveValue::Set(info.last_name),
            gender: ActiveValue::Set(info.gender),
            birth_date: ActiveValue::Set(info.birth_date),
            deleted: ActiveValue::Set(false),
            created_by: ActiveValue::Set(Some(actor)),
            updated_by: ActiveValue::Set(Some(actor)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_patient(model))
    }

    async fn assign_control_no(&self, id: i32, control_no: &str) -> anyhow::Result<()> {
        patient::Entity::update_many()
            .col_expr(patient::Column::ControlNo, Expr::value(control_no))
            .filter(patient::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Patient>> {
        Ok(patient::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_patient))
    }

    async fn update_personal(
        &self,
        id: i32,
        info: PersonalInformation,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>> {
        self.apply_update(id, actor, |model| {
            model.first_name = ActiveValue::Set(info.first_name);
            model.middle_name = ActiveValue::Set(info.middle_name);
            model.last_name = ActiveValue::Set(info.last_name);
            model.gender = ActiveValue::Set(info.gender);
            model.birth_date = ActiveValue::Set(info.birth_date);
        })
        .await
    }

    async fn update_contact(
        &self,
        id: i32,
        info: ContactInformation,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>> {
        self.apply_update(id, actor, |model| {
            model.email = ActiveValue::Set(Some(info.email));
            model.mobile_no = ActiveValue::Set(Some(info.mobile_no));
        })
        .await
    }

    async fn update_address(
        &self,
        id: i32,
        address: Address,
        actor: i32,
    ) -> anyhow::Result<Option<Patient>> {
        self.apply_update(id, actor, |model| {
            model.house_no = ActiveValue::Set(address.house_no);
            model.street = ActiveValue::Set(address.street);
            model.city_or_town = ActiveValue::Set(address.city_or_town);
            model.province_or_region = ActiveValue::Set(address.province_or_region);
            model.postal = ActiveValue::Set(address.postal);
            model.country = ActiveValue::Set(address.country);
        })
        .await
    }

    async fn add_photos(
        &self,
        patient_id: i32,
        paths: Vec<String>,
        actor: i32,
    ) -> anyhow::Result<Vec<PatientPhoto>> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut photos = Vec::with_capacity(paths.len());
        for path in paths {
            let model = photo::ActiveModel {
                patient_id: ActiveValue::Set(patient_id),
                path: ActiveValue::Set(path),
                deleted: ActiveValue::Set(false),
                created_by: ActiveValue::Set(Some(actor)),
                updated_by: ActiveValue::Set(Some(actor)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            photos.push(to_photo(model));
        }
        txn.commit().await?;
        Ok(photos)
    }

    async fn soft_delete_photos(
        &self,
        patient_id: i32,
        photo_ids: &[i32],
        actor: i32,
    ) -> anyhow::Result<u64> {
        let result = photo::Entity::update_many()
            .col_expr(photo::Column::Deleted, Expr::value(true))
            .col_expr(photo::Column::UpdatedBy, Expr::value(actor))
            .col_expr(photo::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(photo::Column::PatientId.eq(patient_id))
            .filter(photo::Column::Id.is_in(photo_ids.to_vec()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn add_documents(
        &self,
        patient_id: i32,
        meta: DocumentMeta,
        paths: Vec<String>,
        actor: i32,
    ) -> anyhow::Result<Vec<PatientDocument>> {
        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let model = document::ActiveModel {
                patient_id: ActiveValue::Set(patient_id),
                path: ActiveValue::Set(path),
                doc_type: ActiveValue::Set(meta.doc_type.clone()),
                description: ActiveValue::Set(meta.description.clone()),
                tags: ActiveValue::Set(join_tags(&meta.tags)),
                deleted: ActiveValue::Set(false),
                created_by: ActiveValue::Set(Some(actor)),
                updated_by: ActiveValue::Set(Some(actor)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            documents.push(to_document(model));
        }
        txn.commit().await?;
        Ok(documents)
    }

    async fn soft_delete_documents(
        &self,
        patient_id: i32,
        document_ids: &[i32],
        actor: i32,
    ) -> anyhow::Result<u64> {
        let result = document::Entity::update_many()
            .col_expr(document::Column::Deleted, Expr::value(true))
            .col_expr(document::Column::UpdatedBy, Expr::value(actor))
            .col_expr(document::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(document::Column::PatientId.eq(patient_id))
            .filter(document::Column::Id.is_in(document_ids.to_vec()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn list(&self, offset: u64, limit: u64) -> anyhow::Result<(Vec<PatientSummary>, u64)> {
        let query = patient::Entity::find();
        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_asc(patient::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        let photo_sets = models.load_many(photo::Entity, &self.db).await?;

        let patients = models
            .into_iter()
            .zip(photo_sets)
            .map(|(model, photos)| PatientSummary {
                patient: to_patient(model),
                photos: photos.into_iter().map(to_photo).collect(),
            })
            .collect();

        Ok((patients, total))
    }

    async fn detail(&self, id: i32) -> anyhow::Result<Option<PatientDetail>> {
        let Some(model) = patient::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let photos = model
            .find_related(photo::Entity)
            .filter(photo::Column::Deleted.eq(false))
            .all(&self.db)
            .await?;
        let documents = model
            .find_related(document::Entity)
            .filter(document::Column::Deleted.eq(false))
            .all(&self.db)
            .await?;

        Ok(Some(PatientDetail {
            patient: to_patient(model),
            photos: photos.into_iter().map(to_photo).collect(),
            documents: documents.into_iter().map(to_document).collect(),
        }))
    }
}
