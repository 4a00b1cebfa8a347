//! Input validation helpers returning `AppError::BadRequest`.

use chrono::{DateTime, Utc};

use crate::server::error::AppError;

/// Requires `value` to hold between `min` and `max` characters.
///
/// Counts Unicode scalar values rather than bytes.
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::BadRequest(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

/// Requires an optional value, when present, to hold at most `max` characters.
pub fn check_max_length(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Requires `end` to be strictly after `start`.
pub fn check_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::BadRequest(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}

/// Requires a minimal email shape: a non-empty local part and domain around one `@`.
pub fn check_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if !valid || email.chars().count() > 100 {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// Returns true for colors of the form `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
