//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values across factories.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a category and a published, open activity inside it.
///
/// Requires the tables from `TestBuilder::with_activity_tables()`.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((category, activity))` - The created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_activity_with_dependencies(
    db: &DatabaseConnection,
) -> Result<(entity::activity_category::Model, entity::activity::Model), DbErr> {
    let category = crate::factory::category::create_category(db).await?;
    let activity = crate::factory::activity::create_activity(db, category.id).await?;

    Ok((category, activity))
}

/// Creates a student registered for a fresh activity.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((student, activity, registration))` - The created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_registered_student(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::activity::Model,
        entity::activity_registration::Model,
    ),
    DbErr,
> {
    let student = crate::factory::user::create_user(db).await?;
    let (_, activity) = create_activity_with_dependencies(db).await?;
    let registration =
        crate::factory::registration::create_registration(db, activity.id, student.id).await?;

    Ok((student, activity, registration))
}
