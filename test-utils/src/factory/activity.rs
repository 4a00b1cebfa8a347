//! Activity factory.
//!
//! Defaults produce an activity that accepts registrations: published, starting in three
//! days, with a deadline two days out and ten open places.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use entity::enums::ActivityStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ActivityFactory<'a> {
    db: &'a DatabaseConnection,
    category_id: i32,
    title: String,
    description: String,
    location: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    registration_deadline: DateTime<Utc>,
    max_participants: i32,
    current_participants: i32,
    status: ActivityStatus,
    created_by: Option<i32>,
    created_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl<'a> ActivityFactory<'a> {
    /// Creates a factory for an activity in `category_id`.
    pub fn new(db: &'a DatabaseConnection, category_id: i32) -> Self {
        let id = next_id();
        let start_time = Utc::now() + Duration::days(3);
        Self {
            db,
            category_id,
            title: format!("Activity {}", id),
            description: format!("Description for activity {}", id),
            location: "Main Hall".to_string(),
            start_time,
            end_time: start_time + Duration::hours(2),
            registration_deadline: start_time - Duration::days(1),
            max_participants: 10,
            current_participants: 0,
            status: ActivityStatus::Published,
            created_by: None,
            created_at: None,
            is_deleted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Moves the start time and keeps end at start + 2h and deadline at start - 1d.
    pub fn starts_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self.end_time = start_time + Duration::hours(2);
        self.registration_deadline = start_time - Duration::days(1);
        self
    }

    pub fn end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn registration_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.registration_deadline = deadline;
        self
    }

    pub fn max_participants(mut self, max_participants: i32) -> Self {
        self.max_participants = max_participants;
        self
    }

    pub fn current_participants(mut self, current_participants: i32) -> Self {
        self.current_participants = current_participants;
        self
    }

    pub fn status(mut self, status: ActivityStatus) -> Self {
        self.status = status;
        self
    }

    pub fn created_by(mut self, user_id: i32) -> Self {
        self.created_by = Some(user_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    pub async fn build(self) -> Result<entity::activity::Model, DbErr> {
        entity::activity::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            location: ActiveValue::Set(self.location),
            start_time: ActiveValue::Set(self.start_time),
            end_time: ActiveValue::Set(self.end_time),
            registration_deadline: ActiveValue::Set(self.registration_deadline),
            max_participants: ActiveValue::Set(self.max_participants),
            current_participants: ActiveValue::Set(self.current_participants),
            image_url: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            category_id: ActiveValue::Set(self.category_id),
            created_by: ActiveValue::Set(self.created_by),
            updated_by: ActiveValue::Set(None),
            created_at: self
                .created_at
                .map(ActiveValue::Set)
                .unwrap_or(ActiveValue::NotSet),
            is_deleted: ActiveValue::Set(self.is_deleted),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open, published activity in `category_id`.
pub async fn create_activity(
    db: &DatabaseConnection,
    category_id: i32,
) -> Result<entity::activity::Model, DbErr> {
    ActivityFactory::new(db, category_id).build().await
}
