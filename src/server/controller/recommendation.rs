use axum::{
    extract::{Query, State},
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
        recommendation::{PreferenceDto, RecommendationDto, UpdatePreferenceDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::recommendation::{Preference, Recommendation},
        service::recommendation::{RecommendationService, MAX_RECOMMENDATIONS},
        state::AppState,
    },
};

/// Tag for grouping recommendation endpoints in OpenAPI documentation
pub static RECOMMENDATION_TAG: &str = "recommendation";

const DEFAULT_COUNT: usize = 10;

#[derive(Deserialize, IntoParams)]
pub struct RecommendationCountParams {
    /// Number of recommendations, 1 to 20
    pub count: Option<usize>,
}

impl RecommendationCountParams {
    /// Requested count clamped to `[1, MAX_RECOMMENDATIONS]`, or 10 when absent.
    fn count(&self) -> usize {
        self.count
            .unwrap_or(DEFAULT_COUNT)
            .clamp(1, MAX_RECOMMENDATIONS)
    }
}

/// GET /api/recommendations - Combined recommendations for the caller
///
/// Mixes collaborative, content-based and hybrid suggestions without duplicates.
///
/// # Authentication
/// Requires user to be logged in
#[utoipa::path(
    get,
    path = "/api/recommendations",
    tag = RECOMMENDATION_TAG,
    params(RecommendationCountParams),
    responses(
        (status = 200, description = "Recommendations", body = Vec<RecommendationDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recommendations(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RecommendationCountParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let recommendations = RecommendationService::new(&state.db, &state.cache)
        .recommended(user.id, params.count())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(recommendations))))
}

/// GET /api/recommendations/collaborative - Suggestions from similar users
#[utoipa::path(
    get,
    path = "/api/recommendations/collaborative",
    tag = RECOMMENDATION_TAG,
    params(RecommendationCountParams),
    responses(
        (status = 200, description = "Recommendations", body = Vec<RecommendationDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_collaborative(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RecommendationCountParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let recommendations = RecommendationService::new(&state.db, &state.cache)
        .collaborative(user.id, params.count())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(recommendations))))
}

/// GET /api/recommendations/content-based - Suggestions from category preferences
#[utoipa::path(
    get,
    path = "/api/recommendations/content-based",
    tag = RECOMMENDATION_TAG,
    params(RecommendationCountParams),
    responses(
        (status = 200, description = "Recommendations", body = Vec<RecommendationDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_content_based(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RecommendationCountParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let recommendations = RecommendationService::new(&state.db, &state.cache)
        .content_based(user.id, params.count())
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(recommendations))))
}

/// GET /api/recommendations/preferences - The caller's category weights
#[utoipa::path(
    get,
    path = "/api/recommendations/preferences",
    tag = RECOMMENDATION_TAG,
    responses(
        (status = 200, description = "Preferences", body = Vec<PreferenceDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_preferences(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let preferences = RecommendationService::new(&state.db, &state.cache)
        .get_preferences(user.id)
        .await?;

    let preferences_dto: Vec<PreferenceDto> =
        preferences.into_iter().map(Preference::into_dto).collect();

    Ok((StatusCode::OK, Json(preferences_dto)))
}

/// POST /api/recommendations/preferences - Set the caller's weight for a category
///
/// # Returns
/// - `200 OK` - Stored preference
/// - `400 Bad Request` - Weight outside 0 to 1
/// - `404 Not Found` - Category does not exist
#[utoipa::path(
    post,
    path = "/api/recommendations/preferences",
    tag = RECOMMENDATION_TAG,
    request_body = UpdatePreferenceDto,
    responses(
        (status = 200, description = "Preference stored", body = PreferenceDto),
        (status = 400, description = "Invalid weight", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_preference(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdatePreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let preference = RecommendationService::new(&state.db, &state.cache)
        .update_preference(user.id, payload.category_id, payload.weight)
        .await?;

    Ok((StatusCode::OK, Json(preference.into_dto())))
}

/// POST /api/recommendations/recalculate - Rebuild the caller's recommendations
#[utoipa::path(
    post,
    path = "/api/recommendations/recalculate",
    tag = RECOMMENDATION_TAG,
    responses(
        (status = 200, description = "Recommendations recalculated", body = MessageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn recalculate(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let written = RecommendationService::new(&state.db, &state.cache)
        .recalculate(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Recalculated {} recommendations", written),
        }),
    ))
}

fn into_dtos(recommendations: Vec<Recommendation>) -> Vec<RecommendationDto> {
    recommendations
        .into_iter()
        .map(Recommendation::into_dto)
        .collect()
}
