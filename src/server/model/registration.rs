//! Activity registration domain model.

use chrono::{DateTime, Utc};
use entity::enums::RegistrationStatus;

use crate::model::registration::{RegistrationDto, RegistrationStatusDto};

/// Registration with the activity title and user name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i32,
    pub activity_id: i32,
    pub activity_title: String,
    pub user_id: i32,
    pub user_name: String,
    pub status: RegistrationStatus,
    pub note: Option<String>,
    pub registration_time: DateTime<Utc>,
}

impl Registration {
    pub fn from_entity(
        entity: entity::activity_registration::Model,
        activity_title: String,
        user_name: String,
    ) -> Self {
        Self {
            id: entity.id,
            activity_id: entity.activity_id,
            activity_title,
            user_id: entity.user_id,
            user_name,
            status: entity.status,
            note: entity.note,
            registration_time: entity.registration_time,
        }
    }

    pub fn into_dto(self) -> RegistrationDto {
        RegistrationDto {
            id: self.id,
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            user_id: self.user_id,
            user_name: self.user_name,
            status: self.status.into(),
            note: self.note,
            registration_time: self.registration_time,
        }
    }
}

impl From<RegistrationStatus> for RegistrationStatusDto {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Registered => Self::Registered,
            RegistrationStatus::Cancelled => Self::Cancelled,
            RegistrationStatus::Attended => Self::Attended,
            RegistrationStatus::Absent => Self::Absent,
        }
    }
}
