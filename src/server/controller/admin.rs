use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{PaginatedUsersDto, SetUserActiveDto, SetUserRoleDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize, IntoParams)]
pub struct UserPageParams {
    /// Zero-indexed page number
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    10
}

/// Get paginated users.
///
/// Returns every account ordered by username.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Page of users with pagination metadata
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(UserPageParams),
    responses(
        (status = 200, description = "Page of users", body = PaginatedUsersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserPageParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .get_all_users(params.page, params.per_page)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Enable or disable an account.
///
/// Disabled users cannot log in and their existing sessions stop authenticating.
///
/// # Access Control
/// - `Admin` - Only admins can change account status
///
/// # Returns
/// - `200 OK` - Status updated
/// - `400 Bad Request` - Admin tried to disable their own account
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/active",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetUserActiveDto,
    responses(
        (status = 200, description = "Status updated", body = MessageDto),
        (status = 400, description = "Cannot disable own account", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_active(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetUserActiveDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db)
        .set_active(admin.id, user_id, payload.is_active)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "User status updated".to_string(),
        }),
    ))
}

/// Change an account's role.
///
/// # Access Control
/// - `Admin` - Only admins can change roles
///
/// # Returns
/// - `200 OK` - Role updated
/// - `404 Not Found` - User does not exist
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetUserRoleDto,
    responses(
        (status = 200, description = "Role updated", body = MessageDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetUserRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db)
        .set_role(user_id, payload.role.into())
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "User role updated".to_string(),
        }),
    ))
}
