//! Integer-backed enumerations stored on entity columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an activity. Only `Published` activities accept registrations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ActivityStatus {
    #[sea_orm(num_value = 0)]
    Draft,
    #[sea_orm(num_value = 1)]
    Published,
    #[sea_orm(num_value = 2)]
    Cancelled,
    #[sea_orm(num_value = 3)]
    Completed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum RegistrationStatus {
    #[sea_orm(num_value = 1)]
    Registered,
    #[sea_orm(num_value = 2)]
    Cancelled,
    #[sea_orm(num_value = 3)]
    Attended,
    #[sea_orm(num_value = 4)]
    Absent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum UserRole {
    #[sea_orm(num_value = 1)]
    Student,
    #[sea_orm(num_value = 2)]
    Teacher,
    #[sea_orm(num_value = 3)]
    Admin,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ScheduleItemType {
    #[sea_orm(num_value = 1)]
    Personal,
    #[sea_orm(num_value = 2)]
    Activity,
    #[sea_orm(num_value = 3)]
    Reminder,
    #[sea_orm(num_value = 4)]
    Meeting,
    #[sea_orm(num_value = 5)]
    Study,
    #[sea_orm(num_value = 6)]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ScheduleItemPriority {
    #[sea_orm(num_value = 1)]
    Low,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    Urgent,
}
