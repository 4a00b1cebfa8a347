//! Activity data repository.
//!
//! Provides `ActivityRepository` for activity rows and their tags. Every read excludes
//! soft-deleted activities and returns `Activity` domain models with category name,
//! creator name and tags resolved through batched lookups. The participant counter is
//! only changed through conditional single-statement updates.

use chrono::{DateTime, Utc};
use entity::enums::ActivityStatus;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::collections::{HashMap, HashSet};

use crate::server::model::{
    activity::{Activity, ActivityParams, ActivitySearchParams, ActivitySort, ActivityTag},
    pagination::Paged,
};

const UNKNOWN_CATEGORY: &str = "Unknown category";

/// Repository providing database operations for activities and activity tags.
pub struct ActivityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ActivityRepository<'a, C> {
    /// Creates a new ActivityRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a published activity with zero participants and its tags.
    ///
    /// Callers should run this inside a transaction so the activity and tags land
    /// together.
    ///
    /// # Arguments
    /// - `params` - Validated activity fields and tag names
    /// - `created_by` - ID of the creating user
    ///
    /// # Returns
    /// - `Ok(Activity)` - The created activity with relations resolved
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: ActivityParams, created_by: i32) -> Result<Activity, DbErr> {
        let activity = entity::activity::ActiveModel {
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(params.end_time),
            registration_deadline: ActiveValue::Set(params.registration_deadline),
            max_participants: ActiveValue::Set(params.max_participants),
            current_participants: ActiveValue::Set(0),
            image_url: ActiveValue::Set(params.image_url),
            status: ActiveValue::Set(ActivityStatus::Published),
            category_id: ActiveValue::Set(params.category_id),
            created_by: ActiveValue::Set(Some(created_by)),
            updated_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_tags(activity.id, &params.tags).await?;

        self.hydrate_one(activity).await
    }

    /// Gets a visible activity by ID with category, creator and tags.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, DbErr> {
        match self.find_entity(id).await? {
            Some(entity) => Ok(Some(self.hydrate_one(entity).await?)),
            None => Ok(None),
        }
    }

    /// Gets the raw activity row, used by the registration workflow.
    pub async fn find_entity(&self, id: i32) -> Result<Option<entity::activity::Model>, DbErr> {
        entity::prelude::Activity::find_by_id(id)
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// Gets visible activities by ID, ordered by ID.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Activity>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = Self::visible()
            .filter(entity::activity::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(entity::activity::Column::Id)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Replaces an activity's fields and its full tag set.
    ///
    /// # Returns
    /// - `Ok(Some(Activity))` - Updated activity
    /// - `Ok(None)` - Activity not found or soft-deleted
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: ActivityParams,
        updated_by: i32,
    ) -> Result<Option<Activity>, DbErr> {
        let Some(entity) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.start_time = ActiveValue::Set(params.start_time);
        active.end_time = ActiveValue::Set(params.end_time);
        active.registration_deadline = ActiveValue::Set(params.registration_deadline);
        active.max_participants = ActiveValue::Set(params.max_participants);
        active.image_url = ActiveValue::Set(params.image_url);
        active.category_id = ActiveValue::Set(params.category_id);
        active.updated_by = ActiveValue::Set(Some(updated_by));
        let updated = active.update(self.db).await?;

        entity::prelude::ActivityTag::delete_many()
            .filter(entity::activity_tag::Column::ActivityId.eq(id))
            .exec(self.db)
            .await?;
        self.insert_tags(id, &params.tags).await?;

        Ok(Some(self.hydrate_one(updated).await?))
    }

    /// Changes an activity's status.
    ///
    /// # Returns
    /// - `Ok(Some(Activity))` - Updated activity
    /// - `Ok(None)` - Activity not found or soft-deleted
    pub async fn update_status(
        &self,
        id: i32,
        status: ActivityStatus,
        updated_by: i32,
    ) -> Result<Option<Activity>, DbErr> {
        let Some(entity) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.status = ActiveValue::Set(status);
        active.updated_by = ActiveValue::Set(Some(updated_by));
        let updated = active.update(self.db).await?;

        Ok(Some(self.hydrate_one(updated).await?))
    }

    /// Soft-deletes an activity.
    ///
    /// # Returns
    /// - `Ok(true)` - Activity was visible and is now deleted
    /// - `Ok(false)` - Activity not found or already deleted
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Activity::update_many()
            .col_expr(entity::activity::Column::IsDeleted, Expr::value(true))
            .col_expr(entity::activity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::activity::Column::Id.eq(id))
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Searches visible activities with filters, ordering and one-based paging.
    ///
    /// # Arguments
    /// - `params` - Filters, sort key, direction and page
    /// - `now` - Reference time for the registerable filter
    ///
    /// # Returns
    /// - `Ok(Paged<Activity>)` - Matching page and total count
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(
        &self,
        params: &ActivitySearchParams,
        now: DateTime<Utc>,
    ) -> Result<Paged<Activity>, DbErr> {
        let mut query = Self::visible();

        if let Some(keyword) = params.keyword.as_deref().filter(|k| !k.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::activity::Column::Title.contains(keyword))
                    .add(entity::activity::Column::Description.contains(keyword)),
            );
        }
        if let Some(category_id) = params.category_id {
            query = query.filter(entity::activity::Column::CategoryId.eq(category_id));
        }
        if let Some(status) = params.status {
            query = query.filter(entity::activity::Column::Status.eq(status));
        }
        if let Some(start_date) = params.start_date {
            query = query.filter(entity::activity::Column::StartTime.gte(start_date));
        }
        if let Some(end_date) = params.end_date {
            query = query.filter(entity::activity::Column::EndTime.lte(end_date));
        }
        if let Some(location) = params.location.as_deref().filter(|l| !l.is_empty()) {
            query = query.filter(entity::activity::Column::Location.contains(location));
        }
        if params.registerable == Some(true) {
            query = Self::registerable(query, now).filter(
                Expr::col(entity::activity::Column::CurrentParticipants)
                    .lt(Expr::col(entity::activity::Column::MaxParticipants)),
            );
        }

        let order = if params.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        let sort_column = match params.sort_by {
            ActivitySort::StartTime => entity::activity::Column::StartTime,
            ActivitySort::CreatedAt => entity::activity::Column::CreatedAt,
            ActivitySort::Title => entity::activity::Column::Title,
        };
        query = query
            .order_by(sort_column, order.clone())
            .order_by(entity::activity::Column::Id, order);

        let paginator = query.paginate(self.db, params.page.page_size);
        let total_count = paginator.num_items().await?;
        let entities = paginator.fetch_page(params.page.zero_based()).await?;

        Ok(Paged::new(
            self.hydrate(entities).await?,
            total_count,
            params.page,
        ))
    }

    /// Published activities by participant count, newest first on ties.
    pub async fn find_popular(&self, limit: u64) -> Result<Vec<Activity>, DbErr> {
        let entities = Self::visible()
            .filter(entity::activity::Column::Status.eq(ActivityStatus::Published))
            .order_by_desc(entity::activity::Column::CurrentParticipants)
            .order_by_desc(entity::activity::Column::CreatedAt)
            .order_by_asc(entity::activity::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Published activities whose registration deadline is still ahead of `now`.
    pub async fn find_registerable(&self, now: DateTime<Utc>) -> Result<Vec<Activity>, DbErr> {
        let entities = Self::registerable(Self::visible(), now)
            .order_by_asc(entity::activity::Column::Id)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Adds one participant if capacity remains.
    ///
    /// The capacity check and increment are a single UPDATE, so concurrent
    /// registrations cannot overshoot `max_participants`.
    ///
    /// # Returns
    /// - `Ok(true)` - A place was taken
    /// - `Ok(false)` - Activity is full, missing, or deleted
    pub async fn try_increment_participants(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Activity::update_many()
            .col_expr(
                entity::activity::Column::CurrentParticipants,
                Expr::col(entity::activity::Column::CurrentParticipants).add(1),
            )
            .col_expr(entity::activity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::activity::Column::Id.eq(id))
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .filter(
                Expr::col(entity::activity::Column::CurrentParticipants)
                    .lt(Expr::col(entity::activity::Column::MaxParticipants)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Releases one participant place, never going below zero.
    pub async fn decrement_participants(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Activity::update_many()
            .col_expr(
                entity::activity::Column::CurrentParticipants,
                Expr::col(entity::activity::Column::CurrentParticipants).sub(1),
            )
            .col_expr(entity::activity::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::activity::Column::Id.eq(id))
            .filter(entity::activity::Column::CurrentParticipants.gt(0))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks published activities that ended before `now` as completed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of activities completed
    pub async fn complete_ended(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Activity::update_many()
            .set(entity::activity::ActiveModel {
                status: ActiveValue::Set(ActivityStatus::Completed),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(entity::activity::Column::Status.eq(ActivityStatus::Published))
            .filter(entity::activity::Column::EndTime.lt(now))
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    fn visible() -> Select<entity::activity::Entity> {
        entity::prelude::Activity::find().filter(entity::activity::Column::IsDeleted.eq(false))
    }

    fn registerable(
        query: Select<entity::activity::Entity>,
        now: DateTime<Utc>,
    ) -> Select<entity::activity::Entity> {
        query
            .filter(entity::activity::Column::Status.eq(ActivityStatus::Published))
            .filter(entity::activity::Column::RegistrationDeadline.gt(now))
    }

    async fn insert_tags(&self, activity_id: i32, tags: &[String]) -> Result<(), DbErr> {
        for tag_name in tags {
            entity::activity_tag::ActiveModel {
                activity_id: ActiveValue::Set(activity_id),
                tag_name: ActiveValue::Set(tag_name.clone()),
                color: ActiveValue::Set(None),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }
        Ok(())
    }

    async fn hydrate_one(&self, entity: entity::activity::Model) -> Result<Activity, DbErr> {
        let id = entity.id;
        self.hydrate(vec![entity])
            .await?
            .pop()
            .ok_or(DbErr::RecordNotFound(format!(
                "Activity with id {} not found after load",
                id
            )))
    }

    /// Resolves category names, creator names and tags with one query each.
    async fn hydrate(&self, entities: Vec<entity::activity::Model>) -> Result<Vec<Activity>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let activity_ids: Vec<i32> = entities.iter().map(|a| a.id).collect();
        let category_ids: Vec<i32> = entities
            .iter()
            .map(|a| a.category_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let creator_ids: Vec<i32> = entities
            .iter()
            .filter_map(|a| a.created_by)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let category_names: HashMap<i32, String> = entity::prelude::ActivityCategory::find()
            .filter(entity::activity_category::Column::Id.is_in(category_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let creator_names: HashMap<i32, String> = if creator_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(creator_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.full_name))
                .collect()
        };

        let mut tags: HashMap<i32, Vec<ActivityTag>> = HashMap::new();
        for tag in entity::prelude::ActivityTag::find()
            .filter(entity::activity_tag::Column::ActivityId.is_in(activity_ids))
            .filter(entity::activity_tag::Column::IsDeleted.eq(false))
            .order_by_asc(entity::activity_tag::Column::Id)
            .all(self.db)
            .await?
        {
            tags.entry(tag.activity_id)
                .or_default()
                .push(ActivityTag::from_entity(tag));
        }

        Ok(entities
            .into_iter()
            .map(|a| {
                let category_name = category_names
                    .get(&a.category_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                let creator_name = a.created_by.and_then(|id| creator_names.get(&id).cloned());
                let activity_tags = tags.remove(&a.id).unwrap_or_default();
                Activity::from_entity(a, category_name, creator_name, activity_tags)
            })
            .collect())
    }
}
