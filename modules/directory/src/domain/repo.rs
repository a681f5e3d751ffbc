use async_trait::async_trait;

use super::model::{
    Credentials, NewUser, Role, RoleListFilter, RoleUsage, User, UserChanges, UserListFilter,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// User plus password hash for the login path.
    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<Credentials>>;

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;

    /// The guard's lookup: id and email must both match and the account
    /// must be active.
    async fn find_active(&self, id: i32, email: &str) -> anyhow::Result<Option<User>>;

    /// Uniqueness probe, self-excluding on updates.
    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>) -> anyhow::Result<bool>;

    async fn insert(&self, new: NewUser) -> anyhow::Result<User>;

    /// `None` when the user does not exist.
    async fn update(&self, id: i32, changes: UserChanges) -> anyhow::Result<Option<User>>;

    /// Returns whether a row was touched.
    async fn set_password(&self, id: i32, password_hash: &str, actor: i32) -> anyhow::Result<bool>;

    async fn deactivate(&self, id: i32, actor: i32) -> anyhow::Result<bool>;

    async fn list(&self, filter: UserListFilter) -> anyhow::Result<(Vec<User>, u64)>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Role>>;

    /// Resolve a set of role ids; missing ids are simply absent from the
    /// result, the caller decides whether that is an error.
    async fn find_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Role>>;

    async fn name_in_use(&self, name: &str, exclude_id: Option<i32>) -> anyhow::Result<bool>;

    async fn insert(&self, name: &str) -> anyhow::Result<Role>;

    async fn rename(&self, id: i32, name: &str) -> anyhow::Result<Option<Role>>;

    async fn delete(&self, id: i32) -> anyhow::Result<()>;

    async fn user_count(&self, id: i32) -> anyhow::Result<u64>;

    async fn list(&self, filter: RoleListFilter) -> anyhow::Result<(Vec<RoleUsage>, u64)>;
}
