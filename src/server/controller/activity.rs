use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        activity::{
            ActivityDto, ActivityStatusDto, CreateActivityDto, PaginatedActivitiesDto,
            UpdateActivityDto, UpdateActivityStatusDto,
        },
        api::{ErrorDto, MessageDto},
        registration::{RegisterActivityDto, RegistrationDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            activity::{Activity, ActivityParams, ActivitySearchParams, ActivitySort},
            pagination::PageRequest,
            registration::Registration,
        },
        service::activity::ActivityService,
        state::AppState,
    },
};

/// Tag for grouping activity endpoints in OpenAPI documentation
pub static ACTIVITY_TAG: &str = "activity";

const DEFAULT_PAGE_SIZE: u64 = 10;
const DEFAULT_POPULAR_COUNT: u64 = 10;

/// Query parameters for activity search.
#[derive(Deserialize, IntoParams)]
pub struct ActivityQuery {
    /// Matches title or description
    pub keyword: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<ActivityStatusDto>,
    /// Activities starting at or after this time
    pub start_date: Option<DateTime<Utc>>,
    /// Activities ending at or before this time
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Only activities open for registration
    pub registerable: Option<bool>,
    /// `starttime` (default), `createdat` or `title`
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_direction: Option<String>,
    /// One-based page number
    pub page_index: Option<u64>,
    pub page_size: Option<u64>,
}

impl ActivityQuery {
    fn into_params(self) -> ActivitySearchParams {
        let descending = self
            .sort_direction
            .is_some_and(|d| d.eq_ignore_ascii_case("desc"));

        ActivitySearchParams {
            keyword: self.keyword.filter(|k| !k.trim().is_empty()),
            category_id: self.category_id,
            status: self.status.map(Into::into),
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location.filter(|l| !l.trim().is_empty()),
            registerable: self.registerable,
            sort_by: ActivitySort::parse(self.sort_by.as_deref()),
            descending,
            page: PageRequest::new(self.page_index, self.page_size, DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct CountParams {
    /// Number of results, clamped by the server
    pub count: Option<u64>,
}

/// Search activities.
///
/// When the caller is logged in, activities they are registered for carry
/// `is_registered = true`.
///
/// # Access Control
/// Public
///
/// # Returns
/// - `200 OK` - Page of activities
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = ACTIVITY_TAG,
    params(ActivityQuery),
    responses(
        (status = 200, description = "Page of activities", body = PaginatedActivitiesDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_activities(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).optional().await?;

    let page = ActivityService::new(&state.db, &state.cache)
        .search(query.into_params(), user.map(|u| u.id))
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

/// Get one activity with category, creator and tags.
///
/// # Access Control
/// Public; `is_registered` is filled in for logged-in users
///
/// # Returns
/// - `200 OK` - The activity
/// - `404 Not Found` - Activity missing or deleted
#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity details", body = ActivityDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).optional().await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .get_by_id(id, user.map(|u| u.id))
        .await?;

    Ok((StatusCode::OK, Json(activity.into_dto())))
}

/// Create a published activity.
///
/// # Access Control
/// - `Staff` - Teachers and admins
///
/// # Returns
/// - `201 Created` - The created activity
/// - `400 Bad Request` - Invalid fields or inactive category
/// - `403 Forbidden` - Caller is a student
#[utoipa::path(
    post,
    path = "/api/activities",
    tag = ACTIVITY_TAG,
    request_body = CreateActivityDto,
    responses(
        (status = 201, description = "Activity created", body = ActivityDto),
        (status = 400, description = "Invalid activity data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a teacher or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_activity(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateActivityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .create(ActivityParams::from_create_dto(payload), user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(activity.into_dto())))
}

/// Replace an activity's fields and tags.
///
/// # Access Control
/// - `Staff` - Teachers and admins
///
/// # Returns
/// - `200 OK` - Updated activity
/// - `400 Bad Request` - Invalid fields or capacity below current participants
/// - `404 Not Found` - Activity missing or deleted
#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = UpdateActivityDto,
    responses(
        (status = 200, description = "Activity updated", body = ActivityDto),
        (status = 400, description = "Invalid activity data", body = ErrorDto),
        (status = 403, description = "Not a teacher or admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateActivityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .update(id, ActivityParams::from_update_dto(payload), user.id)
        .await?;

    Ok((StatusCode::OK, Json(activity.into_dto())))
}

/// Soft-delete an activity.
///
/// # Access Control
/// - `Admin` - Only admins can delete activities
#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ActivityService::new(&state.db, &state.cache)
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change an activity's lifecycle status.
///
/// # Access Control
/// - `Staff` - Teachers and admins
#[utoipa::path(
    put,
    path = "/api/activities/{id}/status",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = UpdateActivityStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ActivityDto),
        (status = 403, description = "Not a teacher or admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_activity_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateActivityStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .update_status(id, payload.status.into(), user.id)
        .await?;

    Ok((StatusCode::OK, Json(activity.into_dto())))
}

/// Register the caller for an activity.
///
/// Adds an Activity-type item to the caller's schedule.
///
/// # Access Control
/// - `Student` - Only students register
///
/// # Returns
/// - `201 Created` - The registration
/// - `400 Bad Request` - Activity not published or deadline passed
/// - `404 Not Found` - Activity missing
/// - `409 Conflict` - Already registered or activity full
#[utoipa::path(
    post,
    path = "/api/activities/{id}/register",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = RegisterActivityDto,
    responses(
        (status = 201, description = "Registered", body = RegistrationDto),
        (status = 400, description = "Registration closed", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 409, description = "Already registered or activity full", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_for_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    payload: Option<Json<RegisterActivityDto>>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student])
        .await?;

    let note = payload.and_then(|Json(dto)| dto.note);

    let registration = ActivityService::new(&state.db, &state.cache)
        .register(id, user.id, note)
        .await?;

    Ok((StatusCode::CREATED, Json(registration.into_dto())))
}

/// Cancel the caller's registration.
///
/// # Access Control
/// - `Student` - Only students register
///
/// # Returns
/// - `200 OK` - Registration cancelled
/// - `404 Not Found` - No active registration
#[utoipa::path(
    delete,
    path = "/api/activities/{id}/register",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Registration cancelled", body = MessageDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 404, description = "Not registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_registration(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student])
        .await?;

    ActivityService::new(&state.db, &state.cache)
        .cancel_registration(id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Registration cancelled".to_string(),
        }),
    ))
}

/// List registrations for an activity.
///
/// # Access Control
/// - `Staff` - Teachers and admins
#[utoipa::path(
    get,
    path = "/api/activities/{id}/registrations",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Registrations", body = Vec<RegistrationDto>),
        (status = 403, description = "Not a teacher or admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_activity_registrations(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Staff])
        .await?;

    let registrations = ActivityService::new(&state.db, &state.cache)
        .get_registrations(id)
        .await?;

    let registrations_dto: Vec<RegistrationDto> = registrations
        .into_iter()
        .map(Registration::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(registrations_dto)))
}

/// Activities the caller is registered for.
#[utoipa::path(
    get,
    path = "/api/activities/my-registrations",
    tag = ACTIVITY_TAG,
    responses(
        (status = 200, description = "Registered activities", body = Vec<ActivityDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_registrations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let activities = ActivityService::new(&state.db, &state.cache)
        .get_user_registered_activities(user.id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(activities))))
}

/// Most registered published activities.
///
/// # Access Control
/// Public
#[utoipa::path(
    get,
    path = "/api/activities/popular",
    tag = ACTIVITY_TAG,
    params(CountParams),
    responses(
        (status = 200, description = "Popular activities", body = Vec<ActivityDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_popular_activities(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Result<impl IntoResponse, AppError> {
    let activities = ActivityService::new(&state.db, &state.cache)
        .get_popular(params.count.unwrap_or(DEFAULT_POPULAR_COUNT))
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(activities))))
}

fn into_dtos(activities: Vec<Activity>) -> Vec<ActivityDto> {
    activities.into_iter().map(Activity::into_dto).collect()
}
