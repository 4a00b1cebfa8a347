//! Small helpers shared across services.

pub mod password;
pub mod validation;
