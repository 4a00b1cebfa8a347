//! Schedule item repository.
//!
//! Every query is scoped by owner: an item belonging to another user is treated
//! exactly like a missing one.

use chrono::{DateTime, Utc};
use entity::enums::{ScheduleItemPriority, ScheduleItemType};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use std::collections::HashMap;

use crate::server::model::{
    pagination::Paged,
    schedule::{ScheduleItem, ScheduleItemParams, ScheduleSearchParams},
};

/// Color given to schedule items created from an activity registration.
pub const ACTIVITY_ITEM_COLOR: &str = "#007bff";

pub struct ScheduleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ScheduleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a schedule item for `user_id`.
    ///
    /// # Returns
    /// - `Ok(ScheduleItem)` - Created item with linked activity details
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        params: ScheduleItemParams,
    ) -> Result<ScheduleItem, DbErr> {
        let item = entity::schedule_item::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(params.end_time),
            item_type: ActiveValue::Set(params.item_type),
            priority: ActiveValue::Set(params.priority),
            color: ActiveValue::Set(params.color),
            is_completed: ActiveValue::Set(params.is_completed),
            note: ActiveValue::Set(params.note),
            activity_id: ActiveValue::Set(params.activity_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.hydrate_one(item).await
    }

    /// Gets one of the user's items.
    pub async fn find_by_id(&self, id: i32, user_id: i32) -> Result<Option<ScheduleItem>, DbErr> {
        match self.find_entity(id, user_id).await? {
            Some(item) => Ok(Some(self.hydrate_one(item).await?)),
            None => Ok(None),
        }
    }

    /// Replaces every writable field of one of the user's items.
    ///
    /// # Returns
    /// - `Ok(Some(ScheduleItem))` - Updated item
    /// - `Ok(None)` - Item missing, deleted, or owned by someone else
    pub async fn update(
        &self,
        id: i32,
        user_id: i32,
        params: ScheduleItemParams,
    ) -> Result<Option<ScheduleItem>, DbErr> {
        let Some(item) = self.find_entity(id, user_id).await? else {
            return Ok(None);
        };

        let mut active = item.into_active_model();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.start_time = ActiveValue::Set(params.start_time);
        active.end_time = ActiveValue::Set(params.end_time);
        active.item_type = ActiveValue::Set(params.item_type);
        active.priority = ActiveValue::Set(params.priority);
        active.color = ActiveValue::Set(params.color);
        active.is_completed = ActiveValue::Set(params.is_completed);
        active.note = ActiveValue::Set(params.note);
        active.activity_id = ActiveValue::Set(params.activity_id);
        let updated = active.update(self.db).await?;

        Ok(Some(self.hydrate_one(updated).await?))
    }

    /// Flips `is_completed` on one of the user's items.
    pub async fn toggle_completion(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<ScheduleItem>, DbErr> {
        let Some(item) = self.find_entity(id, user_id).await? else {
            return Ok(None);
        };

        let completed = item.is_completed;
        let mut active = item.into_active_model();
        active.is_completed = ActiveValue::Set(!completed);
        let updated = active.update(self.db).await?;

        Ok(Some(self.hydrate_one(updated).await?))
    }

    /// Soft-deletes one of the user's items.
    ///
    /// # Returns
    /// - `Ok(true)` - Item deleted
    /// - `Ok(false)` - Nothing visible to delete
    pub async fn soft_delete(&self, id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ScheduleItem::update_many()
            .col_expr(entity::schedule_item::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::schedule_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::schedule_item::Column::Id.eq(id))
            .filter(entity::schedule_item::Column::UserId.eq(user_id))
            .filter(entity::schedule_item::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Searches the user's items ordered by start time then ID.
    pub async fn search(
        &self,
        user_id: i32,
        params: &ScheduleSearchParams,
    ) -> Result<Paged<ScheduleItem>, DbErr> {
        let mut query = self.owned(user_id);

        if let Some(start_date) = params.start_date {
            query = query.filter(entity::schedule_item::Column::StartTime.gte(start_date));
        }
        if let Some(end_date) = params.end_date {
            query = query.filter(entity::schedule_item::Column::EndTime.lte(end_date));
        }
        if let Some(item_type) = params.item_type {
            query = query.filter(entity::schedule_item::Column::ItemType.eq(item_type));
        }
        if let Some(priority) = params.priority {
            query = query.filter(entity::schedule_item::Column::Priority.eq(priority));
        }
        if let Some(is_completed) = params.is_completed {
            query = query.filter(entity::schedule_item::Column::IsCompleted.eq(is_completed));
        }
        if let Some(keyword) = params.keyword.as_deref().filter(|k| !k.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::schedule_item::Column::Title.contains(keyword))
                    .add(entity::schedule_item::Column::Description.contains(keyword)),
            );
        }

        let paginator = Self::chronological(query).paginate(self.db, params.page.page_size);
        let total_count = paginator.num_items().await?;
        let items = paginator.fetch_page(params.page.zero_based()).await?;

        Ok(Paged::new(self.hydrate(items).await?, total_count, params.page))
    }

    /// The user's items starting in `[from, to)`.
    pub async fn find_starting_between(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ScheduleItem>, DbErr> {
        let items = Self::chronological(
            self.owned(user_id)
                .filter(entity::schedule_item::Column::StartTime.gte(from))
                .filter(entity::schedule_item::Column::StartTime.lt(to)),
        )
        .all(self.db)
        .await?;

        self.hydrate(items).await
    }

    /// All of the user's visible items.
    pub async fn find_all_for_user(&self, user_id: i32) -> Result<Vec<ScheduleItem>, DbErr> {
        let items = Self::chronological(self.owned(user_id))
            .all(self.db)
            .await?;

        self.hydrate(items).await
    }

    /// Incomplete items starting after `now`, soonest first.
    pub async fn find_upcoming(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<ScheduleItem>, DbErr> {
        let items = Self::chronological(
            self.owned(user_id)
                .filter(entity::schedule_item::Column::IsCompleted.eq(false))
                .filter(entity::schedule_item::Column::StartTime.gt(now)),
        )
        .limit(limit)
        .all(self.db)
        .await?;

        self.hydrate(items).await
    }

    /// Incomplete items that ended at or before `now`.
    pub async fn find_overdue(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScheduleItem>, DbErr> {
        let items = Self::chronological(
            self.owned(user_id)
                .filter(entity::schedule_item::Column::IsCompleted.eq(false))
                .filter(entity::schedule_item::Column::EndTime.lte(now)),
        )
        .all(self.db)
        .await?;

        self.hydrate(items).await
    }

    /// Whether the user already has a visible item linked to the activity.
    pub async fn has_activity_item(&self, user_id: i32, activity_id: i32) -> Result<bool, DbErr> {
        let count = self
            .owned(user_id)
            .filter(entity::schedule_item::Column::ActivityId.eq(activity_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// The user's earliest visible item linked to the activity.
    pub async fn find_activity_item(
        &self,
        user_id: i32,
        activity_id: i32,
    ) -> Result<Option<ScheduleItem>, DbErr> {
        let item = Self::chronological(
            self.owned(user_id)
                .filter(entity::schedule_item::Column::ActivityId.eq(activity_id)),
        )
        .one(self.db)
        .await?;

        match item {
            Some(item) => Ok(Some(self.hydrate_one(item).await?)),
            None => Ok(None),
        }
    }

    /// Adds an `Activity` item mirroring the activity's time and place.
    pub async fn create_activity_item(
        &self,
        user_id: i32,
        activity: &entity::activity::Model,
    ) -> Result<ScheduleItem, DbErr> {
        self.create(
            user_id,
            ScheduleItemParams {
                title: format!("Attend: {}", activity.title),
                description: Some(activity.description.clone()),
                location: Some(activity.location.clone()),
                start_time: activity.start_time,
                end_time: activity.end_time,
                item_type: ScheduleItemType::Activity,
                priority: ScheduleItemPriority::Medium,
                color: Some(ACTIVITY_ITEM_COLOR.to_string()),
                is_completed: false,
                note: None,
                activity_id: Some(activity.id),
            },
        )
        .await
    }

    /// Soft-deletes every item the user has linked to the activity.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of items removed
    pub async fn soft_delete_activity_items(
        &self,
        user_id: i32,
        activity_id: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::ScheduleItem::update_many()
            .col_expr(entity::schedule_item::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::schedule_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::schedule_item::Column::UserId.eq(user_id))
            .filter(entity::schedule_item::Column::ActivityId.eq(activity_id))
            .filter(entity::schedule_item::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    fn owned(&self, user_id: i32) -> Select<entity::schedule_item::Entity> {
        entity::prelude::ScheduleItem::find()
            .filter(entity::schedule_item::Column::UserId.eq(user_id))
            .filter(entity::schedule_item::Column::IsDeleted.eq(false))
    }

    fn chronological(
        query: Select<entity::schedule_item::Entity>,
    ) -> Select<entity::schedule_item::Entity> {
        query
            .order_by_asc(entity::schedule_item::Column::StartTime)
            .order_by_asc(entity::schedule_item::Column::Id)
    }

    async fn find_entity(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<entity::schedule_item::Model>, DbErr> {
        self.owned(user_id)
            .filter(entity::schedule_item::Column::Id.eq(id))
            .one(self.db)
            .await
    }

    async fn hydrate_one(&self, item: entity::schedule_item::Model) -> Result<ScheduleItem, DbErr> {
        let id = item.id;
        self.hydrate(vec![item])
            .await?
            .pop()
            .ok_or(DbErr::RecordNotFound(format!(
                "Schedule item with id {} not found after load",
                id
            )))
    }

    /// Attaches linked activities. Deleted activities still provide their title.
    async fn hydrate(
        &self,
        items: Vec<entity::schedule_item::Model>,
    ) -> Result<Vec<ScheduleItem>, DbErr> {
        let activity_ids: Vec<i32> = items.iter().filter_map(|i| i.activity_id).collect();

        let activities: HashMap<i32, entity::activity::Model> = if activity_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Activity::find()
                .filter(entity::activity::Column::Id.is_in(activity_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|a| (a.id, a))
                .collect()
        };

        Ok(items
            .into_iter()
            .map(|item| {
                let activity = item.activity_id.and_then(|id| activities.get(&id));
                ScheduleItem::from_entity(item, activity)
            })
            .collect())
    }
}
