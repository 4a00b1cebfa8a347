//! Recommendation snapshot repository.
//!
//! Snapshot rows are derived data, so replacing them deletes the old rows outright.

use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::model::recommendation::SnapshotEntry;

pub struct RecommendationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecommendationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces all snapshot rows for a user.
    ///
    /// Should run inside a transaction so readers never see a half-written snapshot.
    pub async fn replace_for_user(
        &self,
        user_id: i32,
        entries: &[SnapshotEntry],
    ) -> Result<(), DbErr> {
        entity::prelude::ActivityRecommendation::delete_many()
            .filter(entity::activity_recommendation::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        if entries.is_empty() {
            return Ok(());
        }

        let calculated_at = Utc::now();
        let models = entries.iter().map(|e| entity::activity_recommendation::ActiveModel {
            activity_id: ActiveValue::Set(e.activity_id),
            user_id: ActiveValue::Set(user_id),
            score: ActiveValue::Set(e.score),
            reason: ActiveValue::Set(Some(e.reason.clone())),
            calculated_at: ActiveValue::Set(calculated_at),
            created_at: ActiveValue::Set(calculated_at),
            updated_at: ActiveValue::Set(calculated_at),
            is_deleted: ActiveValue::Set(false),
            ..Default::default()
        });

        entity::prelude::ActivityRecommendation::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// A user's snapshot rows, highest score first.
    #[cfg(test)]
    pub async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::activity_recommendation::Model>, DbErr> {
        use sea_orm::QueryOrder;

        entity::prelude::ActivityRecommendation::find()
            .filter(entity::activity_recommendation::Column::UserId.eq(user_id))
            .filter(entity::activity_recommendation::Column::IsDeleted.eq(false))
            .order_by_desc(entity::activity_recommendation::Column::Score)
            .order_by_asc(entity::activity_recommendation::Column::ActivityId)
            .all(self.db)
            .await
    }
}
