use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        schedule::{
            CalendarDayDto, CreateScheduleItemDto, PaginatedScheduleItemsDto,
            ScheduleItemDto, ScheduleItemPriorityDto, ScheduleItemTypeDto,
            ScheduleStatisticsDto, UpdateScheduleItemDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            pagination::{PageRequest, MAX_PAGE_SIZE},
            schedule::{CalendarDay, ScheduleItem, ScheduleItemParams, ScheduleSearchParams},
        },
        service::schedule::ScheduleService,
        state::AppState,
    },
};

/// Tag for grouping schedule endpoints in OpenAPI documentation
pub static SCHEDULE_TAG: &str = "schedule";

const DEFAULT_PAGE_SIZE: u64 = 20;
const DEFAULT_UPCOMING_COUNT: u64 = 10;

/// Query parameters for schedule search.
#[derive(Deserialize, IntoParams)]
pub struct ScheduleQuery {
    /// Items starting at or after this time
    pub start_date: Option<DateTime<Utc>>,
    /// Items ending at or before this time
    pub end_date: Option<DateTime<Utc>>,
    pub item_type: Option<ScheduleItemTypeDto>,
    pub priority: Option<ScheduleItemPriorityDto>,
    pub is_completed: Option<bool>,
    /// Matches title or description
    pub keyword: Option<String>,
    /// One-based page number
    pub page_index: Option<u64>,
    pub page_size: Option<u64>,
}

impl ScheduleQuery {
    fn into_params(self) -> ScheduleSearchParams {
        ScheduleSearchParams {
            start_date: self.start_date,
            end_date: self.end_date,
            item_type: self.item_type.map(Into::into),
            priority: self.priority.map(Into::into),
            is_completed: self.is_completed,
            keyword: self.keyword.filter(|k| !k.trim().is_empty()),
            page: PageRequest::new(self.page_index, self.page_size, DEFAULT_PAGE_SIZE),
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct CalendarQuery {
    /// First day, inclusive
    pub start_date: NaiveDate,
    /// Last day, inclusive
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct UpcomingParams {
    pub count: Option<u64>,
}

/// Create a schedule item.
///
/// # Authentication
/// Requires user to be logged in
///
/// # Returns
/// - `201 Created` - The created item
/// - `400 Bad Request` - Invalid fields
/// - `404 Not Found` - Linked activity does not exist
#[utoipa::path(
    post,
    path = "/api/schedule",
    tag = SCHEDULE_TAG,
    request_body = CreateScheduleItemDto,
    responses(
        (status = 201, description = "Item created", body = ScheduleItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Linked activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateScheduleItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = ScheduleService::new(&state.db)
        .create(ScheduleItemParams::from_create_dto(payload), user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(item.into_dto())))
}

/// Search the caller's schedule items.
#[utoipa::path(
    get,
    path = "/api/schedule",
    tag = SCHEDULE_TAG,
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Page of items", body = PaginatedScheduleItemsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_items(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ScheduleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = ScheduleService::new(&state.db)
        .search(query.into_params(), user.id)
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/schedule/{id}",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule item ID")),
    responses(
        (status = 200, description = "Schedule item", body = ScheduleItemDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = ScheduleService::new(&state.db)
        .get_by_id(id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Replace a schedule item's fields.
///
/// # Returns
/// - `200 OK` - Updated item
/// - `400 Bad Request` - Invalid fields
/// - `404 Not Found` - Item or linked activity missing
#[utoipa::path(
    put,
    path = "/api/schedule/{id}",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule item ID")),
    request_body = UpdateScheduleItemDto,
    responses(
        (status = 200, description = "Item updated", body = ScheduleItemDto),
        (status = 400, description = "Invalid item data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateScheduleItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = ScheduleService::new(&state.db)
        .update(id, ScheduleItemParams::from_update_dto(payload), user.id)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/{id}",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ScheduleService::new(&state.db).delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Flip an item's completion flag.
#[utoipa::path(
    post,
    path = "/api/schedule/{id}/toggle-completion",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule item ID")),
    responses(
        (status = 200, description = "Item updated", body = ScheduleItemDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_completion(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = ScheduleService::new(&state.db)
        .toggle_completion(id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Items grouped by start day over an inclusive date range.
///
/// # Returns
/// - `200 OK` - One entry per day, including empty days
/// - `400 Bad Request` - End before start or range longer than 366 days
#[utoipa::path(
    get,
    path = "/api/schedule/calendar",
    tag = SCHEDULE_TAG,
    params(CalendarQuery),
    responses(
        (status = 200, description = "Calendar days", body = Vec<CalendarDayDto>),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let days = ScheduleService::new(&state.db)
        .calendar(query.start_date, query.end_date, user.id)
        .await?;

    let days_dto: Vec<CalendarDayDto> = days.into_iter().map(CalendarDay::into_dto).collect();

    Ok((StatusCode::OK, Json(days_dto)))
}

#[utoipa::path(
    get,
    path = "/api/schedule/statistics",
    tag = SCHEDULE_TAG,
    responses(
        (status = 200, description = "Schedule statistics", body = ScheduleStatisticsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_statistics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let statistics = ScheduleService::new(&state.db).statistics(user.id).await?;

    Ok((StatusCode::OK, Json(statistics.into_dto())))
}

/// Incomplete items that have not started yet, soonest first.
#[utoipa::path(
    get,
    path = "/api/schedule/upcoming",
    tag = SCHEDULE_TAG,
    params(UpcomingParams),
    responses(
        (status = 200, description = "Upcoming items", body = Vec<ScheduleItemDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_upcoming(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UpcomingParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = params
        .count
        .unwrap_or(DEFAULT_UPCOMING_COUNT)
        .clamp(1, MAX_PAGE_SIZE);
    let items = ScheduleService::new(&state.db)
        .upcoming(user.id, count)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(items))))
}

/// Incomplete items whose end time has passed.
#[utoipa::path(
    get,
    path = "/api/schedule/overdue",
    tag = SCHEDULE_TAG,
    responses(
        (status = 200, description = "Overdue items", body = Vec<ScheduleItemDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_overdue(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let items = ScheduleService::new(&state.db).overdue(user.id).await?;

    Ok((StatusCode::OK, Json(into_dtos(items))))
}

/// Add a registered activity to the caller's schedule.
///
/// Returns the existing item when the activity is already scheduled.
///
/// # Returns
/// - `200 OK` - The linked item
/// - `400 Bad Request` - Caller is not registered for the activity
/// - `404 Not Found` - Activity missing
#[utoipa::path(
    post,
    path = "/api/schedule/activities/{activity_id}",
    tag = SCHEDULE_TAG,
    params(("activity_id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity scheduled", body = ScheduleItemDto),
        (status = 400, description = "Not registered for the activity", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_activity(
    State(state): State<AppState>,
    session: Session,
    Path(activity_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let item = ScheduleService::new(&state.db)
        .add_activity(activity_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(item.into_dto())))
}

/// Remove an activity's items from the caller's schedule.
#[utoipa::path(
    delete,
    path = "/api/schedule/activities/{activity_id}",
    tag = SCHEDULE_TAG,
    params(("activity_id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity removed from schedule", body = MessageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Activity not in schedule", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_activity(
    State(state): State<AppState>,
    session: Session,
    Path(activity_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ScheduleService::new(&state.db)
        .remove_activity(activity_id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Activity removed from schedule".to_string(),
        }),
    ))
}

fn into_dtos(items: Vec<ScheduleItem>) -> Vec<ScheduleItemDto> {
    items.into_iter().map(ScheduleItem::into_dto).collect()
}
