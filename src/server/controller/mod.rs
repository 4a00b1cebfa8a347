//! HTTP request handlers.
//!
//! Controllers resolve the session user through `AuthGuard`, convert DTOs into
//! server-side params, call a service and convert the result back into a DTO. No
//! business rules live here.

pub mod activity;
pub mod admin;
pub mod auth;
pub mod category;
pub mod recommendation;
pub mod schedule;
pub mod user;
