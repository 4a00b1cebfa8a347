//! Schedule item factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use entity::enums::{ScheduleItemPriority, ScheduleItemType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ScheduleItemFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    item_type: ScheduleItemType,
    priority: ScheduleItemPriority,
    is_completed: bool,
    activity_id: Option<i32>,
}

impl<'a> ScheduleItemFactory<'a> {
    /// Defaults to a one hour personal item starting tomorrow.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let start_time = Utc::now() + Duration::days(1);
        Self {
            db,
            user_id,
            title: format!("Schedule item {}", next_id()),
            description: None,
            start_time,
            end_time: start_time + Duration::hours(1),
            item_type: ScheduleItemType::Personal,
            priority: ScheduleItemPriority::Medium,
            is_completed: false,
            activity_id: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets both ends of the item.
    pub fn between(mut self, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn item_type(mut self, item_type: ScheduleItemType) -> Self {
        self.item_type = item_type;
        self
    }

    pub fn priority(mut self, priority: ScheduleItemPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    pub fn activity_id(mut self, activity_id: i32) -> Self {
        self.activity_id = Some(activity_id);
        self
    }

    pub async fn build(self) -> Result<entity::schedule_item::Model, DbErr> {
        entity::schedule_item::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            location: ActiveValue::Set(None),
            start_time: ActiveValue::Set(self.start_time),
            end_time: ActiveValue::Set(self.end_time),
            item_type: ActiveValue::Set(self.item_type),
            priority: ActiveValue::Set(self.priority),
            color: ActiveValue::Set(None),
            is_completed: ActiveValue::Set(self.is_completed),
            note: ActiveValue::Set(None),
            activity_id: ActiveValue::Set(self.activity_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default schedule item for `user_id`.
pub async fn create_schedule_item(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::schedule_item::Model, DbErr> {
    ScheduleItemFactory::new(db, user_id).build().await
}
