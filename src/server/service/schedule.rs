//! Personal schedule service.
//!
//! Every operation is scoped to the owning user; an item that belongs to someone else
//! is reported as missing.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::server::{
    data::{
        activity::ActivityRepository, registration::RegistrationRepository,
        schedule::ScheduleRepository,
    },
    error::AppError,
    model::{
        pagination::Paged,
        schedule::{
            CalendarDay, ScheduleItem, ScheduleItemParams, ScheduleSearchParams,
            ScheduleStatistics,
        },
    },
};

/// Longest calendar range served in one request, in days.
pub const MAX_CALENDAR_DAYS: u64 = 366;

pub struct ScheduleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a schedule item for the user.
    ///
    /// # Returns
    /// - `Ok(ScheduleItem)` - Created item with linked activity details
    /// - `Err(AppError::BadRequest)` - Invalid fields
    /// - `Err(AppError::NotFound)` - Linked activity does not exist
    pub async fn create(
        &self,
        params: ScheduleItemParams,
        user_id: i32,
    ) -> Result<ScheduleItem, AppError> {
        params.validate()?;
        self.require_linked_activity(params.activity_id).await?;

        Ok(ScheduleRepository::new(self.db)
            .create(user_id, params)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32, user_id: i32) -> Result<ScheduleItem, AppError> {
        ScheduleRepository::new(self.db)
            .find_by_id(id, user_id)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    /// Replaces every writable field, including completion and the activity link.
    pub async fn update(
        &self,
        id: i32,
        params: ScheduleItemParams,
        user_id: i32,
    ) -> Result<ScheduleItem, AppError> {
        params.validate()?;
        self.require_linked_activity(params.activity_id).await?;

        ScheduleRepository::new(self.db)
            .update(id, user_id, params)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !ScheduleRepository::new(self.db)
            .soft_delete(id, user_id)
            .await?
        {
            return Err(item_not_found(id));
        }
        Ok(())
    }

    pub async fn toggle_completion(&self, id: i32, user_id: i32) -> Result<ScheduleItem, AppError> {
        ScheduleRepository::new(self.db)
            .toggle_completion(id, user_id)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    /// Filters the user's items, ordered by start time then ID.
    pub async fn search(
        &self,
        params: ScheduleSearchParams,
        user_id: i32,
    ) -> Result<Paged<ScheduleItem>, AppError> {
        Ok(ScheduleRepository::new(self.db)
            .search(user_id, &params)
            .await?)
    }

    /// Groups the user's items by start day over an inclusive date range.
    ///
    /// Every day in the range gets an entry, including days without items. Days are
    /// UTC calendar days.
    ///
    /// # Returns
    /// - `Ok(Vec<CalendarDay>)` - One entry per day, in date order
    /// - `Err(AppError::BadRequest)` - End before start, or more than 366 days
    pub async fn calendar(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_id: i32,
    ) -> Result<Vec<CalendarDay>, AppError> {
        if end_date < start_date {
            return Err(AppError::BadRequest(
                "End date must not be before start date".to_string(),
            ));
        }

        let day_count = (end_date - start_date).num_days() as u64 + 1;
        if day_count > MAX_CALENDAR_DAYS {
            return Err(AppError::BadRequest(format!(
                "Calendar range cannot exceed {} days",
                MAX_CALENDAR_DAYS
            )));
        }

        let day_after_end = end_date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::BadRequest("End date is out of range".to_string()))?;

        let items = ScheduleRepository::new(self.db)
            .find_starting_between(user_id, start_of_day(start_date), start_of_day(day_after_end))
            .await?;

        let mut by_day: BTreeMap<NaiveDate, Vec<ScheduleItem>> = BTreeMap::new();
        for item in items {
            by_day
                .entry(item.start_time.date_naive())
                .or_default()
                .push(item);
        }

        Ok(start_date
            .iter_days()
            .take(day_count as usize)
            .map(|date| CalendarDay {
                date,
                items: by_day.remove(&date).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn statistics(&self, user_id: i32) -> Result<ScheduleStatistics, AppError> {
        let items = ScheduleRepository::new(self.db)
            .find_all_for_user(user_id)
            .await?;

        Ok(ScheduleStatistics::from_items(&items, Utc::now()))
    }

    /// Adds an activity the user is registered for to their schedule.
    ///
    /// Idempotent: an existing linked item is returned unchanged.
    ///
    /// # Returns
    /// - `Ok(ScheduleItem)` - The linked item
    /// - `Err(AppError::NotFound)` - Activity missing or soft-deleted
    /// - `Err(AppError::BadRequest)` - User is not registered for the activity
    pub async fn add_activity(&self, activity_id: i32, user_id: i32) -> Result<ScheduleItem, AppError> {
        let activity = ActivityRepository::new(self.db)
            .find_entity(activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", activity_id)))?;

        if !RegistrationRepository::new(self.db)
            .is_registered(activity_id, user_id)
            .await?
        {
            return Err(AppError::BadRequest(
                "You must be registered for the activity to add it to your schedule".to_string(),
            ));
        }

        let schedule_repo = ScheduleRepository::new(self.db);
        if let Some(existing) = schedule_repo.find_activity_item(user_id, activity_id).await? {
            return Ok(existing);
        }

        Ok(schedule_repo.create_activity_item(user_id, &activity).await?)
    }

    /// Removes the user's items linked to an activity.
    ///
    /// # Returns
    /// - `Ok(())` - At least one item removed
    /// - `Err(AppError::NotFound)` - The user has no item for the activity
    pub async fn remove_activity(&self, activity_id: i32, user_id: i32) -> Result<(), AppError> {
        let removed = ScheduleRepository::new(self.db)
            .soft_delete_activity_items(user_id, activity_id)
            .await?;

        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "No schedule item for activity {}",
                activity_id
            )));
        }
        Ok(())
    }

    /// Incomplete items starting after now, soonest first.
    pub async fn upcoming(&self, user_id: i32, count: u64) -> Result<Vec<ScheduleItem>, AppError> {
        Ok(ScheduleRepository::new(self.db)
            .find_upcoming(user_id, Utc::now(), count)
            .await?)
    }

    /// Incomplete items whose end time has passed.
    pub async fn overdue(&self, user_id: i32) -> Result<Vec<ScheduleItem>, AppError> {
        Ok(ScheduleRepository::new(self.db)
            .find_overdue(user_id, Utc::now())
            .await?)
    }

    async fn require_linked_activity(&self, activity_id: Option<i32>) -> Result<(), AppError> {
        let Some(activity_id) = activity_id else {
            return Ok(());
        };

        if ActivityRepository::new(self.db)
            .find_entity(activity_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Activity {} not found",
                activity_id
            )));
        }
        Ok(())
    }
}

fn item_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Schedule item {} not found", id))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
