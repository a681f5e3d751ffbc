use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use clinic_auth::CurrentUser;
use clinic_http::validate::ensure;
use clinic_http::{ApiError, ApiResponse, ApiResult, FileStorage, PageInfo};

use crate::domain::model::{RoleListFilter, UserListFilter};
use crate::domain::service::{CreateUserParams, DirectoryService, UpdateUserParams};

use super::dto::{
    LoginData, LoginRequest, PasswordChangeRequest, RoleDto, RoleListData, RoleListQuery,
    RolePayload, RoleUsageDto, UploadedFile, UserDto, UserForm, UserListData, UserListQuery,
};

/// Directory under the upload root for user profile photos.
const PROFILE_PHOTOS: &str = "profile-photos";

#[derive(Clone)]
pub struct DirectoryState {
    pub service: Arc<DirectoryService>,
    pub files: FileStorage,
}

impl DirectoryState {
    async fn store_photo(&self, photo: Option<&UploadedFile>) -> Result<Option<String>, ApiError> {
        match photo {
            Some(file) => {
                let path = self
                    .files
                    .save(PROFILE_PHOTOS, &file.name, &file.bytes)
                    .await
                    .map_err(|e| ApiError::Internal(e.into()))?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

pub async fn login(
    State(state): State<DirectoryState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<ApiResponse<LoginData>> {
    ensure(req.validate())?;
    let token = state.service.login(&req.email, &req.password).await?;
    Ok(ApiResponse::ok(
        "User successfully logged in",
        LoginData { token },
    ))
}

pub async fn current_user(
    CurrentUser(user): CurrentUser,
) -> ApiResult<ApiResponse<clinic_auth::AuthUser>> {
    Ok(ApiResponse::ok("User active session", user))
}

pub async fn create_user(
    State(state): State<DirectoryState>,
    CurrentUser(actor): CurrentUser,
    multipart: Multipart,
) -> ApiResult<ApiResponse<UserDto>> {
    let form = UserForm::collect(multipart).await?;
    ensure(form.validate_create())?;

    let profile_photo = state.store_photo(form.profile_photo.as_ref()).await?;
    let user = state
        .service
        .create_user(
            CreateUserParams {
                first_name: form.first_name.unwrap_or_default(),
                last_name: form.last_name.unwrap_or_default(),
                email: form.email.unwrap_or_default(),
                password: form.password.unwrap_or_default(),
                profile_photo,
                role_ids: form.roles.unwrap_or_default(),
            },
            &actor,
        )
        .await?;

    let message = format!("{} was successfully created", user.full_name());
    Ok(ApiResponse::ok(message, user.into()))
}

pub async fn read_user(
    State(state): State<DirectoryState>,
    Path(user_id): Path<i32>,
) -> ApiResult<ApiResponse<UserDto>> {
    let user = state.service.get_user(user_id).await?;
    Ok(ApiResponse::ok("User", user.into()))
}

pub async fn update_user(
    State(state): State<DirectoryState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<i32>,
    multipart: Multipart,
) -> ApiResult<ApiResponse<UserDto>> {
    apply_user_update(&state, user_id, &actor, multipart).await
}

/// Same form as [`update_user`], applied to the caller's own account.
pub async fn update_current_user(
    State(state): State<DirectoryState>,
    CurrentUser(actor): CurrentUser,
    multipart: Multipart,
) -> ApiResult<ApiResponse<UserDto>> {
    apply_user_update(&state, actor.id, &actor, multipart).await
}

async fn apply_user_update(
    state: &DirectoryState,
    user_id: i32,
    actor: &clinic_auth::AuthUser,
    multipart: Multipart,
) -> ApiResult<ApiResponse<UserDto>> {
    let form = UserForm::collect(multipart).await?;
    ensure(form.validate_update())?;

    let profile_photo = state.store_photo(form.profile_photo.as_ref()).await?;
    let user = state
        .service
        .update_user(
            user_id,
            UpdateUserParams {
                first_name: form.first_name.unwrap_or_default(),
                last_name: form.last_name.unwrap_or_default(),
                email: form.email.unwrap_or_default(),
                role_ids: form.roles,
                profile_photo,
            },
            actor,
        )
        .await?;

    let message = format!("{} was successfully updated", user.full_name());
    Ok(ApiResponse::ok(message, user.into()))
}

pub async fn change_current_password(
    State(state): State<DirectoryState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<PasswordChangeRequest>,
) -> ApiResult<ApiResponse<()>> {
    ensure(req.validate())?;
    state
        .service
        .change_password(actor.id, &req.password, &actor)
        .await?;
    Ok(ApiResponse::message("Password successfully updated"))
}

pub async fn delete_user(
    State(state): State<DirectoryState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<ApiResponse<()>> {
    let user = state.service.get_user(user_id).await?;
    state.service.deactivate_user(user_id, &actor).await?;
    Ok(ApiResponse::message(format!(
        "{} successfully deleted.",
        user.full_name()
    )))
}

pub async fn list_users(
    State(state): State<DirectoryState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<ApiResponse<UserListData>> {
    let (users, total) = state
        .service
        .list_users(UserListFilter {
            roles: query.role_names(),
            offset: query.page().offset(),
            limit: query.page().limit(),
        })
        .await?;

    Ok(ApiResponse::ok(
        "Get list of users",
        UserListData {
            users: users.into_iter().map(UserDto::from).collect(),
            pagination: PageInfo::new(total, &query.page()),
        },
    ))
}

pub async fn create_role(
    State(state): State<DirectoryState>,
    Json(req): Json<RolePayload>,
) -> ApiResult<ApiResponse<RoleDto>> {
    ensure(req.validate())?;
    let role = state.service.create_role(req.name.trim()).await?;
    let message = format!("{} was successfully created", role.name);
    Ok(ApiResponse::ok(message, role.into()))
}

pub async fn read_role(
    State(state): State<DirectoryState>,
    Path(role_id): Path<i32>,
) -> ApiResult<ApiResponse<RoleDto>> {
    let role = state.service.get_role(role_id).await?;
    Ok(ApiResponse::ok("Role", role.into()))
}

pub async fn update_role(
    State(state): State<DirectoryState>,
    Path(role_id): Path<i32>,
    Json(req): Json<RolePayload>,
) -> ApiResult<ApiResponse<RoleDto>> {
    ensure(req.validate())?;
    let role = state.service.rename_role(role_id, req.name.trim()).await?;
    let message = format!("{} role updated", role.name);
    Ok(ApiResponse::ok(message, role.into()))
}

pub async fn delete_role(
    State(state): State<DirectoryState>,
    Path(role_id): Path<i32>,
) -> ApiResult<ApiResponse<()>> {
    let role = state.service.delete_role(role_id).await?;
    Ok(ApiResponse::message(format!(
        "{} successfully deleted.",
        role.name
    )))
}

pub async fn list_roles(
    State(state): State<DirectoryState>,
    Query(query): Query<RoleListQuery>,
) -> ApiResult<ApiResponse<RoleListData>> {
    let (roles, total) = state
        .service
        .list_roles(RoleListFilter {
            keyword: query.keyword.clone().filter(|k| !k.trim().is_empty()),
            offset: query.page().offset(),
            limit: query.page().limit(),
        })
        .await?;

    Ok(ApiResponse::ok(
        "Get list of roles",
        RoleListData {
            roles: roles.into_iter().map(RoleUsageDto::from).collect(),
            pagination: PageInfo::new(total, &query.page()),
        },
    ))
}
