//! Request and response DTOs for the user and role endpoints.
//!
//! User create/update arrive as `multipart/form-data` because they may carry
//! a profile photo; everything else is JSON or query parameters.

use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use clinic_http::validate::is_valid_email;
use clinic_http::{ApiError, FieldError, PageInfo, PageParams};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{Role, RoleUsage, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Provide a valid email"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordChangeRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        if self.confirm_password.is_empty() || self.confirm_password != self.password {
            errors.push(FieldError::new("confirmPassword", "Confirm your password"));
        }
        errors
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RolePayload {
    #[serde(default)]
    pub name: String,
}

impl RolePayload {
    pub fn validate(&self) -> Vec<FieldError> {
        if self.name.trim().is_empty() {
            vec![FieldError::new("name", "Name is required")]
        } else {
            Vec::new()
        }
    }
}

/// `roles` arrives as a comma-separated list of role names.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub roles: Option<String>,
}

impl UserListQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RoleListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub keyword: Option<String>,
}

impl RoleListQuery {
    pub fn page(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// A file lifted out of a multipart field; written to disk only after the
/// rest of the form validates.
#[derive(Debug)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The user create/update multipart form, collected field by field.
#[derive(Debug, Default)]
pub struct UserForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub roles: Option<Vec<i32>>,
    roles_malformed: bool,
    pub profile_photo: Option<UploadedFile>,
}

impl UserForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match name.as_str() {
                "profilePhoto" => {
                    let file_name = field.file_name().unwrap_or_default().to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                    if !bytes.is_empty() {
                        form.profile_photo = Some(UploadedFile {
                            name: file_name,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                other => {
                    let value = field
                        .text()
                        .await
                        .map_err(|_| ApiError::Rule("Invalid parameters, check input".into()))?;
                    match other {
                        "firstName" => form.first_name = Some(value),
                        "lastName" => form.last_name = Some(value),
                        "email" => form.email = Some(value),
                        "password" => form.password = Some(value),
                        "confirmPassword" => form.confirm_password = Some(value),
                        // Repeatable field; each occurrence may itself hold a
                        // comma-separated list of role ids.
                        "roles" => form.push_roles(&value),
                        _ => {}
                    }
                }
            }
        }
        Ok(form)
    }

    fn push_roles(&mut self, value: &str) {
        let ids = self.roles.get_or_insert_with(Vec::new);
        for part in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match part.parse::<i32>() {
                Ok(id) => ids.push(id),
                Err(_) => self.roles_malformed = true,
            }
        }
    }

    fn require(
        errors: &mut Vec<FieldError>,
        value: Option<&String>,
        field: &str,
        message: &str,
    ) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v.clone()),
            _ => {
                errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    fn validate_email(&self, errors: &mut Vec<FieldError>) {
        match self.email.as_deref() {
            None | Some("") => errors.push(FieldError::new("email", "Email is required")),
            Some(email) if !is_valid_email(email) => {
                errors.push(FieldError::new("email", "Provide a valid email"));
            }
            _ => {}
        }
    }

    fn validate_roles(&self, errors: &mut Vec<FieldError>, required: bool) {
        if self.roles_malformed {
            errors.push(FieldError::new("roles", "Roles must be an array"));
        } else if required && self.roles.as_ref().is_none_or(Vec::is_empty) {
            errors.push(FieldError::new("roles", "Roles is required"));
        }
    }

    /// All fields mandatory, password confirmed, at least one role.
    pub fn validate_create(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        Self::require(
            &mut errors,
            self.first_name.as_ref(),
            "firstName",
            "First name is required",
        );
        Self::require(
            &mut errors,
            self.last_name.as_ref(),
            "lastName",
            "Last name is required",
        );
        self.validate_email(&mut errors);
        let password = Self::require(
            &mut errors,
            self.password.as_ref(),
            "password",
            "Password is required",
        );
        match (&password, &self.confirm_password) {
            (Some(p), Some(c)) if p == c => {}
            (None, _) => {}
            _ => errors.push(FieldError::new("confirmPassword", "Confirm your password")),
        }
        self.validate_roles(&mut errors, true);
        errors
    }

    /// Names and email mandatory; password and roles stay as stored when
    /// the form omits them.
    pub fn validate_update(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        Self::require(
            &mut errors,
            self.first_name.as_ref(),
            "firstName",
            "First name is required",
        );
        Self::require(
            &mut errors,
            self.last_name.as_ref(),
            "lastName",
            "Last name is required",
        );
        self.validate_email(&mut errors);
        self.validate_roles(&mut errors, false);
        errors
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleUsageDto {
    pub id: i32,
    pub name: String,
    pub user_count: u64,
}

impl From<RoleUsage> for RoleUsageDto {
    fn from(role: RoleUsage) -> Self {
        Self {
            id: role.id,
            name: role.name,
            user_count: role.user_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub active: bool,
    pub roles: Vec<RoleDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            profile_photo: user.profile_photo,
            active: user.active,
            roles: user.roles.into_iter().map(RoleDto::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListData {
    pub users: Vec<UserDto>,
    pub pagination: PageInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleListData {
    pub roles: Vec<RoleUsageDto>,
    pub pagination: PageInfo,
}
