use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
pub enum RegistrationStatusDto {
    Registered,
    Cancelled,
    Attended,
    Absent,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RegistrationDto {
    pub id: i32,
    pub activity_id: i32,
    pub activity_title: String,
    pub user_id: i32,
    pub user_name: String,
    pub status: RegistrationStatusDto,
    pub note: Option<String>,
    pub registration_time: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct RegisterActivityDto {
    pub note: Option<String>,
}
