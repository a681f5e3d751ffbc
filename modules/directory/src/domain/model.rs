use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

/// Role plus how many users currently hold it; list endpoints only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleUsage {
    pub id: i32,
    pub name: String,
    pub user_count: u64,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub active: bool,
    pub roles: Vec<Role>,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user together with the stored password hash; login path only.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_photo: Option<String>,
    pub role_ids: Vec<i32>,
    pub actor: Option<i32>,
}

/// Field assignments for a user update. `role_ids: None` leaves the role
/// set untouched; `profile_photo: None` keeps the stored photo.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_ids: Option<Vec<i32>>,
    pub profile_photo: Option<String>,
    pub actor: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    /// Role names; non-empty means "users holding any of these roles".
    pub roles: Vec<String>,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RoleListFilter {
    /// Substring match on the role name.
    pub keyword: Option<String>,
    pub offset: u64,
    pub limit: u64,
}
