//! `sea-orm` implementations of the user and role repositories.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, JoinType, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};

use crate::domain::model::{
    Credentials, NewUser, Role, RoleListFilter, RoleUsage, User, UserChanges, UserListFilter,
};
use crate::domain::repo::{RoleRepository, UserRepository};

use super::entities::{role, user, user_role};

fn to_role(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
    }
}

fn to_user(model: user::Model, roles: Vec<role::Model>) -> User {
    User {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        profile_photo: model.profile_photo,
        active: model.active,
        roles: roles.into_iter().map(to_role).collect(),
        created_by: model.created_by,
        updated_by: model.updated_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one_with_roles(
        &self,
        query: sea_orm::Select<user::Entity>,
    ) -> anyhow::Result<Option<(user::Model, Vec<role::Model>)>> {
        let mut rows = query
            .find_with_related(role::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.pop())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<Credentials>> {
        let row = self
            .find_one_with_roles(user::Entity::find().filter(user::Column::Email.eq(email)))
            .await?;
        Ok(row.map(|(model, roles)| {
            let password_hash = model.password.clone();
            Credentials {
                user: to_user(model, roles),
                password_hash,
            }
        }))
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let row = self.find_one_with_roles(user::Entity::find_by_id(id)).await?;
        Ok(row.map(|(model, roles)| to_user(model, roles)))
    }

    async fn find_active(&self, id: i32, email: &str) -> anyhow::Result<Option<User>> {
        let row = self
            .find_one_with_roles(
                user::Entity::find()
                    .filter(user::Column::Id.eq(id))
                    .filter(user::Column::Email.eq(email))
                    .filter(user::Column::Active.eq(true)),
            )
            .await?;
        Ok(row.map(|(model, roles)| to_user(model, roles)))
    }

    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        let mut query = user::Entity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn insert(&self, new: NewUser) -> anyhow::Result<User> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let model = user::ActiveModel {
            first_name: ActiveValue::Set(new.first_name),
            last_name: ActiveValue::Set(new.last_name),
            email: ActiveValue::Set(new.email),
            password: ActiveValue::Set(new.password_hash),
            profile_photo: ActiveValue::Set(new.profile_photo),
            active: ActiveValue::Set(true),
            created_by: ActiveValue::Set(new.actor),
            updated_by: ActiveValue::Set(new.actor),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !new.role_ids.is_empty() {
            user_role::Entity::insert_many(new.role_ids.iter().map(|role_id| {
                user_role::ActiveModel {
                    user_id: ActiveValue::Set(model.id),
                    role_id: ActiveValue::Set(*role_id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        let roles = role::Entity::find()
            .filter(role::Column::Id.is_in(new.role_ids))
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(to_user(model, roles))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let txn = self.db.begin().await?;
        let Some(existing) = user::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: user::ActiveModel = existing.into();
        model.first_name = ActiveValue::Set(changes.first_name);
        model.last_name = ActiveValue::Set(changes.last_name);
        model.email = ActiveValue::Set(changes.email);
        if changes.profile_photo.is_some() {
            model.profile_photo = ActiveValue::Set(changes.profile_photo);
        }
        model.updated_by = ActiveValue::Set(Some(changes.actor));
        model.updated_at = ActiveValue::Set(Utc::now());
        let model = model.update(&txn).await?;

        if let Some(role_ids) = changes.role_ids {
            user_role::Entity::delete_many()
                .filter(user_role::Column::UserId.eq(id))
                .exec(&txn)
                .await?;
            if !role_ids.is_empty() {
                user_role::Entity::insert_many(role_ids.iter().map(|role_id| {
                    user_role::ActiveModel {
                        user_id: ActiveValue::Set(id),
                        role_id: ActiveValue::Set(*role_id),
                    }
                }))
                .exec(&txn)
                .await?;
            }
        }

        let roles = model.find_related(role::Entity).all(&txn).await?;
        txn.commit().await?;

        Ok(Some(to_user(model, roles)))
    }

    async fn set_password(&self, id: i32, password_hash: &str, actor: i32) -> anyhow::Result<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedBy, Expr::value(actor))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, id: i32, actor: i32) -> anyhow::Result<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Active, Expr::value(false))
            .col_expr(user::Column::UpdatedBy, Expr::value(actor))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, filter: UserListFilter) -> anyhow::Result<(Vec<User>, u64)> {
        let mut query = user::Entity::find();

        if !filter.roles.is_empty() {
            // Membership goes through the join table, so the page query
            // itself stays free of duplicated rows.
            let holders = Query::select()
                .column((user_role::Entity, user_role::Column::UserId))
                .from(user_role::Entity)
                .inner_join(
                    role::Entity,
                    Expr::col((role::Entity, role::Column::Id))
                        .equals((user_role::Entity, user_role::Column::RoleId)),
                )
                .and_where(Expr::col((role::Entity, role::Column::Name)).is_in(filter.roles))
                .to_owned();
            query = query.filter(user::Column::Id.in_subquery(holders));
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_asc(user::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        let role_sets = models
            .load_many_to_many(role::Entity, user_role::Entity, &self.db)
            .await?;
        let users = models
            .into_iter()
            .zip(role_sets)
            .map(|(model, roles)| to_user(model, roles))
            .collect();

        Ok((users, total))
    }
}

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct RoleUsageRow {
    id: i32,
    name: String,
    user_count: i64,
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Role>> {
        Ok(role::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_role))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Role>> {
        let models = role::Entity::find()
            .filter(role::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(to_role).collect())
    }

    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        let mut query = role::Entity::find().filter(role::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(role::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn insert(&self, name: &str) -> anyhow::Result<Role> {
        let model = role::ActiveModel {
            name: ActiveValue::Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(to_role(model))
    }

    async fn rename(&self, id: i32, name: &str) -> anyhow::Result<Option<Role>> {
        let Some(existing) = role::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut model: role::ActiveModel = existing.into();
        model.name = ActiveValue::Set(name.to_owned());
        Ok(Some(to_role(model.update(&self.db).await?)))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<()> {
        role::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn user_count(&self, id: i32) -> anyhow::Result<u64> {
        Ok(user_role::Entity::find()
            .filter(user_role::Column::RoleId.eq(id))
            .count(&self.db)
            .await?)
    }

    async fn list(&self, filter: RoleListFilter) -> anyhow::Result<(Vec<RoleUsage>, u64)> {
        let mut base = role::Entity::find();
        if let Some(keyword) = &filter.keyword {
            base = base.filter(role::Column::Name.contains(keyword));
        }

        let total = base.clone().count(&self.db).await?;
        let rows = base
            .select_only()
            .column(role::Column::Id)
            .column(role::Column::Name)
            .column_as(
                Expr::col((user_role::Entity, user_role::Column::UserId)).count(),
                "user_count",
            )
            .join_rev(JoinType::LeftJoin, user_role::Relation::Role.def())
            .group_by(role::Column::Id)
            .group_by(role::Column::Name)
            .order_by_desc(role::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .into_model::<RoleUsageRow>()
            .all(&self.db)
            .await?;

        let roles = rows
            .into_iter()
            .map(|row| RoleUsage {
                id: row.id,
                name: row.name,
                user_count: u64::try_from(row.user_count).unwrap_or_default(),
            })
            .collect();

        Ok((roles, total))
    }
}
