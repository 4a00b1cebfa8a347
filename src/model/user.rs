use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    registration::RegistrationDto,
    schedule::{ScheduleItemDto, ScheduleStatisticsDto},
};

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
pub enum UserRoleDto {
    Student,
    Teacher,
    Admin,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRoleDto,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RegisterUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Student or Teacher. Defaults to Student.
    pub role: Option<UserRoleDto>,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateProfileDto {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ClaimAdminDto {
    pub code: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SetUserActiveDto {
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SetUserRoleDto {
    pub role: UserRoleDto,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedUsersDto {
    pub users: Vec<UserDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Everything the client needs to render a user's dashboard in one request.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UserContextDto {
    pub user: UserDto,
    pub registrations: Vec<RegistrationDto>,
    pub upcoming_schedule: Vec<ScheduleItemDto>,
    pub overdue_schedule: Vec<ScheduleItemDto>,
    pub schedule_statistics: ScheduleStatisticsDto,
}
