use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Violations of the activity registration rules.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Activity is a draft, cancelled or completed.
    #[error("Activity {0} is not open for registration")]
    NotPublished(i32),

    /// Registration deadline is in the past.
    #[error("Registration deadline for activity {0} has passed")]
    DeadlinePassed(i32),

    /// Every place is taken.
    #[error("Activity {0} is full")]
    ActivityFull(i32),

    /// The user already holds an active registration.
    #[error("User {user_id} is already registered for activity {activity_id}")]
    AlreadyRegistered { activity_id: i32, user_id: i32 },

    /// The user has no active registration to cancel.
    #[error("User {user_id} is not registered for activity {activity_id}")]
    NotRegistered { activity_id: i32, user_id: i32 },
}

/// # Returns
/// - 400 Bad Request - For `NotPublished` and `DeadlinePassed`
/// - 404 Not Found - For `NotRegistered`
/// - 409 Conflict - For `ActivityFull` and `AlreadyRegistered`
impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotPublished(_) | Self::DeadlinePassed(_) => StatusCode::BAD_REQUEST,
            Self::ActivityFull(_) | Self::AlreadyRegistered { .. } => StatusCode::CONFLICT,
            Self::NotRegistered { .. } => StatusCode::NOT_FOUND,
        };

        error_response(status, self.to_string())
    }
}
