use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    ///
    /// Results in 401 Unauthorized.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session refers to a user that no longer exists or was soft-deleted.
    ///
    /// Results in 401 Unauthorized.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The user lacks the role required by the endpoint.
    ///
    /// Results in 403 Forbidden. The message is logged, never returned.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// The account exists but has been deactivated by an admin.
    ///
    /// Results in 403 Forbidden.
    #[error("User {0} is disabled")]
    AccountDisabled(i32),

    /// Username and password did not match an active account.
    ///
    /// Results in 401 Unauthorized with a generic message.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The presented admin code is wrong, used or expired.
    ///
    /// Results in 400 Bad Request.
    #[error("Invalid or expired admin code")]
    InvalidAdminCode,
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; details are logged at debug level.
///
/// # Returns
/// - 400 Bad Request - For `InvalidAdminCode`
/// - 401 Unauthorized - For missing sessions, unknown users and bad credentials
/// - 403 Forbidden - For `AccessDenied` and `AccountDisabled`
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Not logged in")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            Self::AccessDenied(_, _) => error_response(StatusCode::FORBIDDEN, "Access denied"),
            Self::AccountDisabled(_) => {
                error_response(StatusCode::FORBIDDEN, "Account is disabled")
            }
            Self::InvalidAdminCode => {
                error_response(StatusCode::BAD_REQUEST, "Invalid or expired admin code")
            }
        }
    }
}
