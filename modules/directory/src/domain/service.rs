use std::sync::Arc;

use async_trait::async_trait;
use clinic_auth::{password, AuthUser, JwtCodec, UserDirectory};

use super::error::DirectoryError;
use super::model::{
    NewUser, Role, RoleListFilter, RoleUsage, User, UserChanges, UserListFilter,
};
use super::repo::{RoleRepository, UserRepository};

/// Raw (pre-hash) user creation input; field-shape validation already
/// happened at the API layer.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub profile_photo: Option<String>,
    pub role_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_ids: Option<Vec<i32>>,
    pub profile_photo: Option<String>,
}

pub struct DirectoryService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    jwt: Arc<JwtCodec>,
    bcrypt_cost: u32,
}

impl DirectoryService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        jwt: Arc<JwtCodec>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            roles,
            jwt,
            bcrypt_cost,
        }
    }

    fn sanitized(user: &User) -> AuthUser {
        AuthUser {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            profile_photo: user.profile_photo.clone(),
            roles: user.roles.iter().map(|r| r.name.clone()).collect(),
        }
    }

    /// Verify credentials and issue a bearer token.
    pub async fn login(&self, email: &str, raw_password: &str) -> Result<String, DirectoryError> {
        tracing::info!(email, "login attempt");

        let credentials = self
            .users
            .find_credentials(email)
            .await?
            .ok_or(DirectoryError::InvalidCredentials)?;

        if !credentials.user.active
            || !password::verify_password(raw_password, &credentials.password_hash)
        {
            tracing::warn!(email, "login failed");
            return Err(DirectoryError::InvalidCredentials);
        }

        let token = self
            .jwt
            .sign(&Self::sanitized(&credentials.user))
            .map_err(|e| DirectoryError::Internal(e.into()))?;

        tracing::info!(user_id = credentials.user.id, "login succeeded");
        Ok(token)
    }

    pub async fn create_user(
        &self,
        params: CreateUserParams,
        actor: &AuthUser,
    ) -> Result<User, DirectoryError> {
        if self.users.email_in_use(&params.email, None).await? {
            return Err(DirectoryError::field("email", "Email already used."));
        }
        self.ensure_roles_exist(&params.role_ids).await?;

        let password_hash = password::hash_password(&params.password, self.bcrypt_cost)?;
        let user = self
            .users
            .insert(NewUser {
                first_name: params.first_name,
                last_name: params.last_name,
                email: params.email,
                password_hash,
                profile_photo: params.profile_photo,
                role_ids: params.role_ids,
                actor: Some(actor.id),
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i32) -> Result<User, DirectoryError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::UserNotFound)
    }

    pub async fn update_user(
        &self,
        id: i32,
        params: UpdateUserParams,
        actor: &AuthUser,
    ) -> Result<User, DirectoryError> {
        if self.users.email_in_use(&params.email, Some(id)).await? {
            return Err(DirectoryError::field("email", "Email already used."));
        }
        if let Some(role_ids) = &params.role_ids {
            self.ensure_roles_exist(role_ids).await?;
        }

        self.users
            .update(
                id,
                UserChanges {
                    first_name: params.first_name,
                    last_name: params.last_name,
                    email: params.email,
                    role_ids: params.role_ids,
                    profile_photo: params.profile_photo,
                    actor: actor.id,
                },
            )
            .await?
            .ok_or(DirectoryError::UserNotFound)
    }

    pub async fn change_password(
        &self,
        user_id: i32,
        raw_password: &str,
        actor: &AuthUser,
    ) -> Result<(), DirectoryError> {
        let password_hash = password::hash_password(raw_password, self.bcrypt_cost)?;
        if self
            .users
            .set_password(user_id, &password_hash, actor.id)
            .await?
        {
            Ok(())
        } else {
            Err(DirectoryError::UserNotFound)
        }
    }

    /// Soft delete: the account is deactivated, tokens stop resolving.
    pub async fn deactivate_user(&self, id: i32, actor: &AuthUser) -> Result<(), DirectoryError> {
        if self.users.deactivate(id, actor.id).await? {
            tracing::info!(user_id = id, by = actor.id, "user deactivated");
            Ok(())
        } else {
            Err(DirectoryError::UserNotFound)
        }
    }

    pub async fn list_users(
        &self,
        filter: UserListFilter,
    ) -> Result<(Vec<User>, u64), DirectoryError> {
        Ok(self.users.list(filter).await?)
    }

    pub async fn create_role(&self, name: &str) -> Result<Role, DirectoryError> {
        if self.roles.name_in_use(name, None).await? {
            return Err(DirectoryError::field("name", "Role name already used."));
        }
        let role = self.roles.insert(name).await?;
        tracing::info!(role_id = role.id, name = %role.name, "role created");
        Ok(role)
    }

    pub async fn get_role(&self, id: i32) -> Result<Role, DirectoryError> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::RoleNotFound)
    }

    pub async fn rename_role(&self, id: i32, name: &str) -> Result<Role, DirectoryError> {
        if self.roles.name_in_use(name, Some(id)).await? {
            return Err(DirectoryError::field("name", "Role name already used."));
        }
        self.roles
            .rename(id, name)
            .await?
            .ok_or(DirectoryError::RoleNotFound)
    }

    /// Refused while any user still holds the role.
    pub async fn delete_role(&self, id: i32) -> Result<Role, DirectoryError> {
        let role = self
            .roles
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::RoleNotFound)?;

        if self.roles.user_count(id).await? > 0 {
            return Err(DirectoryError::RoleInUse(role.name));
        }

        self.roles.delete(id).await?;
        tracing::info!(role_id = id, name = %role.name, "role deleted");
        Ok(role)
    }

    pub async fn list_roles(
        &self,
        filter: RoleListFilter,
    ) -> Result<(Vec<RoleUsage>, u64), DirectoryError> {
        Ok(self.roles.list(filter).await?)
    }

    async fn ensure_roles_exist(&self, role_ids: &[i32]) -> Result<(), DirectoryError> {
        let found = self.roles.find_by_ids(role_ids).await?;
        if found.len() == role_ids.len() {
            Ok(())
        } else {
            Err(DirectoryError::field("roles", "Role does not exist"))
        }
    }
}

/// The authentication guard's lookup seam.
#[async_trait]
impl UserDirectory for DirectoryService {
    async fn find_active_user(&self, id: i32, email: &str) -> anyhow::Result<Option<AuthUser>> {
        let user = self.users.find_active(id, email).await?;
        Ok(user.as_ref().map(Self::sanitized))
    }
}
