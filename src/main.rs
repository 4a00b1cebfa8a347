mod model;
mod server;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::session_store::ExpiredDeletion;
use tracing_subscriber::EnvFilter;

use crate::server::{
    cache::AppCache,
    config::Config,
    error::{config::ConfigError, AppError},
    scheduler::recommendation_refresh,
    service::admin::code::AdminCodeService, startup, state::AppState,
};

/// Interval between sweeps of expired sessions.
const SESSION_CLEANUP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let (session_store, session) = startup::connect_to_session(&db, &config).await?;

    tokio::spawn(async move {
        if let Err(e) = session_store
            .continuously_delete_expired(SESSION_CLEANUP_INTERVAL)
            .await
        {
            tracing::error!("Session cleanup error: {}", e);
        }
    });

    let cache = AppCache::new();
    let admin_code_service = AdminCodeService::new();

    tracing::info!("Starting server");

    // Check for admin users and log a claim code if none exist
    startup::check_for_admin(&db, &admin_code_service).await?;

    // Held for the lifetime of the server so the job keeps running
    let _scheduler = recommendation_refresh::start_scheduler(
        db.clone(),
        cache.clone(),
        &config.recommendation_refresh_cron,
    )
    .await?;

    let cors = match &config.allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "ALLOWED_ORIGIN".to_string(),
                    value: origin.clone(),
                })?;
            // Session cookies need credentials, which rule out wildcards
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
        None => CorsLayer::permissive(),
    };

    let app = server::router::router()
        .with_state(AppState::new(db, cache, admin_code_service))
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on {}", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
