//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - In-process TTL cache for categories, popular activities and recommendations
//! - Admin code service for claiming the first admin account

use sea_orm::DatabaseConnection;

use super::{cache::AppCache, service::admin::code::AdminCodeService};

/// Application state shared across all HTTP request handlers.
///
/// Every field is a cheap handle onto shared data, so cloning the state per request
/// does not copy connections or cached values.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for executing queries.
    pub db: DatabaseConnection,

    /// Shared cache used by services for read-through lookups.
    pub cache: AppCache,

    /// Service for generating and validating the one-time admin code.
    pub admin_code_service: AdminCodeService,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `cache` - Shared TTL cache
    /// - `admin_code_service` - Service for managing the admin code
    ///
    /// # Returns
    /// - `AppState` - New application state instance
    pub fn new(
        db: DatabaseConnection,
        cache: AppCache,
        admin_code_service: AdminCodeService,
    ) -> Self {
        Self {
            db,
            cache,
            admin_code_service,
        }
    }
}
