use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config, data::user::UserRepository, error::AppError,
    service::admin::code::AdminCodeService,
};

/// Days of inactivity after which a session expires.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session store on the application database and the session layer.
///
/// The store shares the SeaORM connection pool, so sessions live in the same SQLite
/// file as the application tables. The session table is created if missing.
///
/// # Arguments
/// - `db` - Connected database
/// - `config` - Application configuration, for the cookie `Secure` flag
///
/// # Returns
/// - `Ok((SqliteStore, SessionManagerLayer))` - Store for expiry cleanup and the layer
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<(SqliteStore, SessionManagerLayer<SqliteStore>), AppError> {
    let session_store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store.clone())
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            SESSION_INACTIVITY_DAYS,
        )));

    Ok((session_store, session_layer))
}

/// Generates an admin code when no admin account exists yet.
///
/// The code is written to the log so the operator can claim admin rights through
/// `POST /api/auth/admin-code` after logging in with any account.
///
/// # Arguments
/// - `db` - Database connection
/// - `admin_code_service` - Service holding the one-time code
///
/// # Returns
/// - `Ok(())` - Check completed, code generated if needed
/// - `Err(AppError::DbErr)` - Failed to query for admins
pub async fn check_for_admin(
    db: &DatabaseConnection,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.generate().await;

    tracing::info!(
        "No admin account exists. Log in and submit admin code {} to POST /api/auth/admin-code within 10 minutes",
        code
    );

    Ok(())
}
