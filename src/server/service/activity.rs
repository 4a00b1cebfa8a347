//! Activity service for business logic.
//!
//! This module provides the `ActivityService` for activity management and the
//! registration workflow. Multi-step writes run inside a single database transaction;
//! every repository used within one is constructed on the transaction handle. Cache
//! entries derived from activity data are dropped only after a successful commit.

use chrono::Utc;
use entity::enums::{ActivityStatus, RegistrationStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    cache::{recommendations_key, AppCache, CATEGORIES_KEY, MEDIUM_TTL, POPULAR_ACTIVITIES_KEY},
    data::{
        activity::ActivityRepository, category::CategoryRepository,
        registration::RegistrationRepository, schedule::ScheduleRepository,
        user::UserRepository,
    },
    error::{is_unique_violation, registration::RegistrationError, AppError},
    model::{
        activity::{Activity, ActivityParams, ActivitySearchParams},
        pagination::Paged,
        registration::Registration,
    },
};

/// Number of popular activities kept in the cache; requests are served by slicing.
pub const POPULAR_CACHE_SIZE: u64 = 50;

/// Service providing business logic for activities and registrations.
pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a AppCache,
}

impl<'a> ActivityService<'a> {
    /// Creates a new ActivityService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `cache` - Shared cache for popular activities and invalidation
    pub fn new(db: &'a DatabaseConnection, cache: &'a AppCache) -> Self {
        Self { db, cache }
    }

    /// Searches activities with filters, sorting and one-based pages.
    ///
    /// When `current_user` is given, activities the user is registered for are flagged.
    pub async fn search(
        &self,
        params: ActivitySearchParams,
        current_user: Option<i32>,
    ) -> Result<Paged<Activity>, AppError> {
        let activity_repo = ActivityRepository::new(self.db);
        let mut page = activity_repo.search(&params, Utc::now()).await?;

        if let Some(user_id) = current_user {
            self.mark_registered(&mut page.items, user_id).await?;
        }

        Ok(page)
    }

    /// Gets an activity with category, creator and tags.
    ///
    /// # Returns
    /// - `Ok(Activity)` - The activity, with `is_registered` set for `current_user`
    /// - `Err(AppError::NotFound)` - Activity missing or soft-deleted
    pub async fn get_by_id(&self, id: i32, current_user: Option<i32>) -> Result<Activity, AppError> {
        let mut activity = ActivityRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| activity_not_found(id))?;

        if let Some(user_id) = current_user {
            activity.is_registered = RegistrationRepository::new(self.db)
                .is_registered(id, user_id)
                .await?;
        }

        Ok(activity)
    }

    /// Creates a published activity with its tags in one transaction.
    ///
    /// # Returns
    /// - `Ok(Activity)` - The created activity
    /// - `Err(AppError::BadRequest)` - Invalid fields or unknown/inactive category
    pub async fn create(&self, params: ActivityParams, created_by: i32) -> Result<Activity, AppError> {
        params.validate()?;

        let txn = self.db.begin().await?;

        require_active_category(&txn, params.category_id).await?;
        let activity = ActivityRepository::new(&txn)
            .create(params, created_by)
            .await?;

        txn.commit().await?;
        self.invalidate_activity_caches().await;

        tracing::info!(
            "User {} created activity {} ({})",
            created_by,
            activity.title,
            activity.id
        );

        Ok(activity)
    }

    /// Replaces an activity's fields and tags in one transaction.
    ///
    /// # Returns
    /// - `Ok(Activity)` - Updated activity
    /// - `Err(AppError::BadRequest)` - Invalid fields, inactive category, or a capacity
    ///   below the current participant count
    /// - `Err(AppError::NotFound)` - Activity missing or soft-deleted
    pub async fn update(
        &self,
        id: i32,
        params: ActivityParams,
        updated_by: i32,
    ) -> Result<Activity, AppError> {
        params.validate()?;

        let txn = self.db.begin().await?;
        let activity_repo = ActivityRepository::new(&txn);

        let existing = activity_repo
            .find_entity(id)
            .await?
            .ok_or_else(|| activity_not_found(id))?;

        if params.max_participants < existing.current_participants {
            return Err(AppError::BadRequest(format!(
                "Maximum participants cannot be lower than the {} already registered",
                existing.current_participants
            )));
        }

        require_active_category(&txn, params.category_id).await?;

        let activity = activity_repo
            .update(id, params, updated_by)
            .await?
            .ok_or_else(|| activity_not_found(id))?;

        txn.commit().await?;
        self.invalidate_activity_caches().await;

        Ok(activity)
    }

    /// Soft-deletes an activity.
    ///
    /// # Returns
    /// - `Ok(())` - Activity deleted
    /// - `Err(AppError::NotFound)` - Activity missing or already deleted
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ActivityRepository::new(self.db).soft_delete(id).await? {
            return Err(activity_not_found(id));
        }

        self.invalidate_activity_caches().await;
        tracing::info!("Deleted activity {}", id);

        Ok(())
    }

    /// Changes an activity's lifecycle status.
    pub async fn update_status(
        &self,
        id: i32,
        status: ActivityStatus,
        updated_by: i32,
    ) -> Result<Activity, AppError> {
        let activity = ActivityRepository::new(self.db)
            .update_status(id, status, updated_by)
            .await?
            .ok_or_else(|| activity_not_found(id))?;

        self.invalidate_activity_caches().await;

        Ok(activity)
    }

    /// Registers a user for an activity.
    ///
    /// Runs in one transaction: the activity must be published with its deadline ahead,
    /// the user must not already be registered, and a place must be free. The place is
    /// taken with a conditional increment so concurrent requests cannot overfill the
    /// activity. A cancelled registration is reactivated rather than duplicated, and an
    /// Activity-type schedule item is added unless the user already has one.
    ///
    /// # Arguments
    /// - `activity_id` - Activity to register for
    /// - `user_id` - Registering user
    /// - `note` - Optional note for the organizers
    ///
    /// # Returns
    /// - `Ok(Registration)` - The active registration
    /// - `Err(AppError::NotFound)` - Activity missing or soft-deleted
    /// - `Err(RegistrationError::NotPublished)` - Activity is not published
    /// - `Err(RegistrationError::DeadlinePassed)` - Registration deadline has passed
    /// - `Err(RegistrationError::AlreadyRegistered)` - User already holds a registration
    ///   that is not cancelled, or a concurrent request inserted one first
    /// - `Err(RegistrationError::ActivityFull)` - No places left
    pub async fn register(
        &self,
        activity_id: i32,
        user_id: i32,
        note: Option<String>,
    ) -> Result<Registration, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let activity_repo = ActivityRepository::new(&txn);
        let activity = activity_repo
            .find_entity(activity_id)
            .await?
            .ok_or_else(|| activity_not_found(activity_id))?;

        if activity.status != ActivityStatus::Published {
            return Err(RegistrationError::NotPublished(activity_id).into());
        }
        if activity.registration_deadline <= now {
            return Err(RegistrationError::DeadlinePassed(activity_id).into());
        }

        let registration_repo = RegistrationRepository::new(&txn);
        let existing = registration_repo.find(activity_id, user_id).await?;

        // Only a cancelled registration may be reused
        if existing
            .as_ref()
            .is_some_and(|r| r.status != RegistrationStatus::Cancelled)
        {
            return Err(RegistrationError::AlreadyRegistered {
                activity_id,
                user_id,
            }
            .into());
        }

        if !activity_repo.try_increment_participants(activity_id).await? {
            return Err(RegistrationError::ActivityFull(activity_id).into());
        }

        let registration = match existing {
            Some(cancelled) => registration_repo.reactivate(cancelled, note).await?,
            None => registration_repo
                .create(activity_id, user_id, note)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        RegistrationError::AlreadyRegistered {
                            activity_id,
                            user_id,
                        }
                        .into()
                    } else {
                        AppError::from(e)
                    }
                })?,
        };

        let schedule_repo = ScheduleRepository::new(&txn);
        if !schedule_repo.has_activity_item(user_id, activity_id).await? {
            schedule_repo.create_activity_item(user_id, &activity).await?;
        }

        let user_name = UserRepository::new(&txn)
            .find_names_by_ids(&[user_id])
            .await?
            .remove(&user_id)
            .unwrap_or_default();

        txn.commit().await?;
        self.invalidate_registration_caches(user_id).await;

        tracing::info!("User {} registered for activity {}", user_id, activity_id);

        Ok(Registration::from_entity(
            registration,
            activity.title,
            user_name,
        ))
    }

    /// Cancels a user's registration.
    ///
    /// Runs in one transaction: the registration becomes `Cancelled`, the participant
    /// count drops by one (never below zero) and the activity's schedule items for the
    /// user are soft-deleted.
    ///
    /// # Returns
    /// - `Ok(())` - Registration cancelled
    /// - `Err(RegistrationError::NotRegistered)` - No active registration exists
    pub async fn cancel_registration(&self, activity_id: i32, user_id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let registration_repo = RegistrationRepository::new(&txn);
        let registration = registration_repo
            .find(activity_id, user_id)
            .await?
            .filter(|r| r.status == RegistrationStatus::Registered)
            .ok_or(RegistrationError::NotRegistered {
                activity_id,
                user_id,
            })?;

        registration_repo
            .set_status(registration, RegistrationStatus::Cancelled)
            .await?;
        ActivityRepository::new(&txn)
            .decrement_participants(activity_id)
            .await?;
        ScheduleRepository::new(&txn)
            .soft_delete_activity_items(user_id, activity_id)
            .await?;

        txn.commit().await?;
        self.invalidate_registration_caches(user_id).await;

        tracing::info!(
            "User {} cancelled registration for activity {}",
            user_id,
            activity_id
        );

        Ok(())
    }

    /// Gets every registration for an activity, oldest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Registration>)` - Registrations with user names
    /// - `Err(AppError::NotFound)` - Activity missing or soft-deleted
    pub async fn get_registrations(&self, activity_id: i32) -> Result<Vec<Registration>, AppError> {
        if ActivityRepository::new(self.db)
            .find_entity(activity_id)
            .await?
            .is_none()
        {
            return Err(activity_not_found(activity_id));
        }

        Ok(RegistrationRepository::new(self.db)
            .find_by_activity(activity_id)
            .await?)
    }

    /// Gets the activities a user is currently registered for.
    pub async fn get_user_registered_activities(
        &self,
        user_id: i32,
    ) -> Result<Vec<Activity>, AppError> {
        let activity_ids = RegistrationRepository::new(self.db)
            .find_registered_activity_ids(user_id)
            .await?;

        let mut activities = ActivityRepository::new(self.db)
            .find_by_ids(&activity_ids)
            .await?;
        for activity in &mut activities {
            activity.is_registered = true;
        }

        Ok(activities)
    }

    /// Gets the most registered published activities, reading through the cache.
    ///
    /// The cache holds the top `POPULAR_CACHE_SIZE` and each request takes a prefix, so
    /// `count` is clamped to `[1, POPULAR_CACHE_SIZE]`.
    pub async fn get_popular(&self, count: u64) -> Result<Vec<Activity>, AppError> {
        let count = count.clamp(1, POPULAR_CACHE_SIZE) as usize;

        let mut activities = match self
            .cache
            .get_json::<Vec<Activity>>(POPULAR_ACTIVITIES_KEY)
            .await
        {
            Some(cached) => cached,
            None => {
                let activities = ActivityRepository::new(self.db)
                    .find_popular(POPULAR_CACHE_SIZE)
                    .await?;
                self.cache
                    .set_json(POPULAR_ACTIVITIES_KEY, &activities, MEDIUM_TTL)
                    .await;
                activities
            }
        };

        activities.truncate(count);
        Ok(activities)
    }

    async fn mark_registered(&self, activities: &mut [Activity], user_id: i32) -> Result<(), AppError> {
        if activities.is_empty() {
            return Ok(());
        }

        let registered = RegistrationRepository::new(self.db)
            .find_registered_activity_ids(user_id)
            .await?;
        for activity in activities {
            activity.is_registered = registered.binary_search(&activity.id).is_ok();
        }

        Ok(())
    }

    async fn invalidate_activity_caches(&self) {
        self.cache.remove(POPULAR_ACTIVITIES_KEY).await;
        self.cache.remove(CATEGORIES_KEY).await;
    }

    async fn invalidate_registration_caches(&self, user_id: i32) {
        self.cache.remove(POPULAR_ACTIVITIES_KEY).await;
        self.cache.remove(&recommendations_key(user_id)).await;
    }
}

fn activity_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Activity {} not found", id))
}

/// Requires the category to exist, be visible and be active.
async fn require_active_category<C: ConnectionTrait>(db: &C, category_id: i32) -> Result<(), AppError> {
    match CategoryRepository::new(db).find_by_id(category_id).await? {
        Some(category) if category.is_active => Ok(()),
        _ => Err(AppError::BadRequest(format!(
            "Category {} does not exist or is inactive",
            category_id
        ))),
    }
}
