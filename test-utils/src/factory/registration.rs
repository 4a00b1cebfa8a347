//! Activity registration factory.

use chrono::Utc;
use entity::enums::RegistrationStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct RegistrationFactory<'a> {
    db: &'a DatabaseConnection,
    activity_id: i32,
    user_id: i32,
    status: RegistrationStatus,
    note: Option<String>,
    is_deleted: bool,
}

impl<'a> RegistrationFactory<'a> {
    /// Defaults to a `Registered` row without a note.
    pub fn new(db: &'a DatabaseConnection, activity_id: i32, user_id: i32) -> Self {
        Self {
            db,
            activity_id,
            user_id,
            status: RegistrationStatus::Registered,
            note: None,
            is_deleted: false,
        }
    }

    pub fn status(mut self, status: RegistrationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Inserts the registration row only; the activity's participant count is untouched.
    pub async fn build(self) -> Result<entity::activity_registration::Model, DbErr> {
        entity::activity_registration::ActiveModel {
            activity_id: ActiveValue::Set(self.activity_id),
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            note: ActiveValue::Set(self.note),
            registration_time: ActiveValue::Set(Utc::now()),
            is_deleted: ActiveValue::Set(self.is_deleted),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a `Registered` registration for `user_id` on `activity_id`.
pub async fn create_registration(
    db: &DatabaseConnection,
    activity_id: i32,
    user_id: i32,
) -> Result<entity::activity_registration::Model, DbErr> {
    RegistrationFactory::new(db, activity_id, user_id)
        .build()
        .await
}
