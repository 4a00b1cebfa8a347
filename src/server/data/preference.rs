//! User category preference repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::recommendation::Preference;

const UNKNOWN_CATEGORY: &str = "Unknown category";

pub struct PreferenceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PreferenceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets a user's preferences with category names, highest weight first.
    ///
    /// Preferences pointing at a category that no longer exists are reported as
    /// "Unknown category".
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Preference>, DbErr> {
        let rows = entity::prelude::UserActivityPreference::find()
            .filter(entity::user_activity_preference::Column::UserId.eq(user_id))
            .filter(entity::user_activity_preference::Column::IsDeleted.eq(false))
            .order_by_desc(entity::user_activity_preference::Column::Weight)
            .order_by_asc(entity::user_activity_preference::Column::CategoryId)
            .all(self.db)
            .await?;

        let category_ids: Vec<i32> = rows.iter().map(|p| p.category_id).collect();
        let names: HashMap<i32, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::ActivityCategory::find()
                .filter(entity::activity_category::Column::Id.is_in(category_ids))
                .filter(entity::activity_category::Column::IsDeleted.eq(false))
                .all(self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|p| {
                let name = names
                    .get(&p.category_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                Preference::from_entity(p, name)
            })
            .collect())
    }

    /// A user's weights keyed by category ID.
    pub async fn find_weights(&self, user_id: i32) -> Result<HashMap<i32, f64>, DbErr> {
        let rows = entity::prelude::UserActivityPreference::find()
            .filter(entity::user_activity_preference::Column::UserId.eq(user_id))
            .filter(entity::user_activity_preference::Column::IsDeleted.eq(false))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|p| (p.category_id, p.weight)).collect())
    }

    /// Inserts or updates the weight for (user, category).
    ///
    /// A previously soft-deleted row is revived rather than duplicated, since the
    /// (user, category) pair is unique.
    pub async fn upsert(
        &self,
        user_id: i32,
        category_id: i32,
        weight: f64,
    ) -> Result<entity::user_activity_preference::Model, DbErr> {
        let existing = entity::prelude::UserActivityPreference::find()
            .filter(entity::user_activity_preference::Column::UserId.eq(user_id))
            .filter(entity::user_activity_preference::Column::CategoryId.eq(category_id))
            .one(self.db)
            .await?;

        match existing {
            Some(row) => {
                let mut active = row.into_active_model();
                active.weight = ActiveValue::Set(weight);
                active.last_updated = ActiveValue::Set(Utc::now());
                active.is_deleted = ActiveValue::Set(false);
                active.update(self.db).await
            }
            None => {
                entity::user_activity_preference::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    category_id: ActiveValue::Set(category_id),
                    weight: ActiveValue::Set(weight),
                    last_updated: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
