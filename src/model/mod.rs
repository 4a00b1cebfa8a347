//! API data transfer objects.
//!
//! These types define the JSON bodies accepted and returned by the HTTP API and derive
//! `ToSchema` for the OpenAPI document. Server-side domain models convert into and out
//! of them at the controller boundary.

pub mod activity;
pub mod api;
pub mod category;
pub mod recommendation;
pub mod registration;
pub mod schedule;
pub mod user;
