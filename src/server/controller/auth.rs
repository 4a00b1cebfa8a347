use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{ClaimAdminDto, LoginDto, RegisterUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::RegisterUserParams,
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// POST /api/auth/register - Create an account and log it in
///
/// Students and teachers may register themselves. The Admin role can only be
/// obtained through the one-time admin code.
///
/// # Authentication
/// Public
///
/// # Returns
/// - `201 Created` - The new account, now stored in the session
/// - `400 Bad Request` - Invalid fields or Admin role requested
/// - `409 Conflict` - Username or email already taken
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Username or email already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user_service = UserService::new(&state.db);

    let user = user_service
        .register(RegisterUserParams::from_dto(payload))
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// POST /api/auth/login - Log in with username and password
///
/// The session ID is cycled before the user ID is stored.
///
/// # Authentication
/// Public
///
/// # Returns
/// - `200 OK` - The logged-in user
/// - `401 Unauthorized` - Unknown user, wrong password or disabled account
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user_service = UserService::new(&state.db);

    let user = user_service
        .login(&payload.username, &payload.password)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    tracing::info!("User {} ({}) logged in", user.username, user.id);

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/auth/logout - Clear the session
///
/// # Authentication
/// None; logging out without a session succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out".to_string(),
        }),
    ))
}

/// GET /api/auth/user - Get the logged-in user
///
/// # Authentication
/// Requires user to be logged in
///
/// # Returns
/// - `200 OK` - The session user
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// POST /api/auth/admin-code - Claim admin rights with the startup code
///
/// The code is logged at startup when no admin exists and can be used once.
///
/// # Authentication
/// Requires user to be logged in
///
/// # Returns
/// - `200 OK` - The promoted user
/// - `400 Bad Request` - Code wrong, used or expired
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    post,
    path = "/api/auth/admin-code",
    tag = AUTH_TAG,
    request_body = ClaimAdminDto,
    responses(
        (status = 200, description = "Admin rights granted", body = UserDto),
        (status = 400, description = "Invalid admin code", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn claim_admin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ClaimAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user = UserService::new(&state.db)
        .claim_admin(user.id, &payload.code, &state.admin_code_service)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
