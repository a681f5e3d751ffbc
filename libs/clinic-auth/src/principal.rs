use serde::{Deserialize, Serialize};

/// Sanitized authenticated user attached to the request. Never carries
/// the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    pub roles: Vec<String>,
}

impl AuthUser {
    /// Non-empty intersection check used by the authorization guard.
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        self.roles.iter().any(|r| required.contains(&r.as_str()))
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
