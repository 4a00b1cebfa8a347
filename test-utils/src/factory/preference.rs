//! Category preference factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a preference weight for `user_id` on `category_id`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owner of the preference
/// - `category_id` - Category the weight applies to
/// - `weight` - Affinity in `[0, 1]`
///
/// # Returns
/// - `Ok(entity::user_activity_preference::Model)` - Created preference
/// - `Err(DbErr)` - Database error during insert
pub async fn create_preference(
    db: &DatabaseConnection,
    user_id: i32,
    category_id: i32,
    weight: f64,
) -> Result<entity::user_activity_preference::Model, DbErr> {
    entity::user_activity_preference::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        category_id: ActiveValue::Set(category_id),
        weight: ActiveValue::Set(weight),
        last_updated: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
