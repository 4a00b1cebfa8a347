//! Request-level authentication helpers.

pub mod auth;
pub mod session;
