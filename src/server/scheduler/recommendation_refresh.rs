use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    cache::{AppCache, POPULAR_ACTIVITIES_KEY},
    data::activity::ActivityRepository,
    error::AppError,
    service::recommendation::RecommendationService,
};

/// Starts the recommendation refresh scheduler
///
/// On every tick of `cron` the job:
/// - Marks published activities whose end time has passed as completed and drops the
///   cached popular list when any changed
/// - Recalculates recommendation snapshots for every active user
///
/// # Arguments
/// - `db`: Database connection
/// - `cache`: Shared cache, so refreshed users lose their stale cached lists
/// - `cron`: Six-field cron expression
pub async fn start_scheduler(
    db: DatabaseConnection,
    cache: AppCache,
    cron: &str,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let db = db.clone();
        let cache = cache.clone();

        Box::pin(async move {
            if let Err(e) = refresh(&db, &cache).await {
                tracing::error!("Error refreshing recommendations: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Recommendation refresh scheduler started ({})", cron);

    Ok(scheduler)
}

/// Runs one refresh pass.
async fn refresh(db: &DatabaseConnection, cache: &AppCache) -> Result<(), AppError> {
    let completed = ActivityRepository::new(db).complete_ended(Utc::now()).await?;
    if completed > 0 {
        cache.remove(POPULAR_ACTIVITIES_KEY).await;
        tracing::info!("Marked {} ended activities as completed", completed);
    }

    let refreshed = RecommendationService::new(db, cache).refresh_all().await?;
    tracing::info!("Refreshed recommendations for {} users", refreshed);

    Ok(())
}
