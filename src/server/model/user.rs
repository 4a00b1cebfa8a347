//! User domain models and parameters.

use chrono::{DateTime, Utc};
use entity::enums::UserRole;

use crate::{
    model::user::{
        PaginatedUsersDto, RegisterUserDto, UpdateProfileDto, UserContextDto, UserDto,
        UserRoleDto,
    },
    server::model::{
        registration::Registration,
        schedule::{ScheduleItem, ScheduleStatistics},
    },
};

/// Application user without credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
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

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// The password hash is dropped here and never leaves the data layer through `User`.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            full_name: entity.full_name,
            phone: entity.phone,
            avatar: entity.avatar,
            role: entity.role,
            is_active: entity.is_active,
            last_login_at: entity.last_login_at,
            student_id: entity.student_id,
            major: entity.major,
            grade: entity.grade,
            employee_id: entity.employee_id,
            department: entity.department,
            title: entity.title,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            avatar: self.avatar,
            role: self.role.into(),
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            student_id: self.student_id,
            major: self.major,
            grade: self.grade,
            employee_id: self.employee_id,
            department: self.department,
            title: self.title,
            created_at: self.created_at,
        }
    }

    /// Teachers and admins manage activities.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Teacher | UserRole::Admin)
    }
}

impl From<UserRole> for UserRoleDto {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Student => Self::Student,
            UserRole::Teacher => Self::Teacher,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<UserRoleDto> for UserRole {
    fn from(role: UserRoleDto) -> Self {
        match role {
            UserRoleDto::Student => Self::Student,
            UserRoleDto::Teacher => Self::Teacher,
            UserRoleDto::Admin => Self::Admin,
        }
    }
}

/// Profile fields shared by registration and profile updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDetails {
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
}

/// Parameters for self-registration.
#[derive(Debug, Clone)]
pub struct RegisterUserParams {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub details: ProfileDetails,
}

impl RegisterUserParams {
    pub fn from_dto(dto: RegisterUserDto) -> Self {
        Self {
            username: dto.username.trim().to_string(),
            email: dto.email.trim().to_string(),
            password: dto.password,
            full_name: dto.full_name.trim().to_string(),
            phone: dto.phone,
            role: dto.role.map(UserRole::from).unwrap_or(UserRole::Student),
            details: ProfileDetails {
                student_id: dto.student_id,
                major: dto.major,
                grade: dto.grade,
                employee_id: dto.employee_id,
                department: dto.department,
                title: dto.title,
            },
        }
    }
}

/// Parameters for inserting a user row once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub details: ProfileDetails,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileParams {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub details: ProfileDetails,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            full_name: dto.full_name.trim().to_string(),
            email: dto.email.trim().to_string(),
            phone: dto.phone,
            avatar: dto.avatar,
            details: ProfileDetails {
                student_id: dto.student_id,
                major: dto.major,
                grade: dto.grade,
                employee_id: dto.employee_id,
                department: dto.department,
                title: dto.title,
            },
        }
    }
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    /// Zero-indexed page number.
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// A user's dashboard: profile, registrations and schedule overview.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: User,
    pub registrations: Vec<Registration>,
    pub upcoming_schedule: Vec<ScheduleItem>,
    pub overdue_schedule: Vec<ScheduleItem>,
    pub schedule_statistics: ScheduleStatistics,
}

impl UserContext {
    pub fn into_dto(self) -> UserContextDto {
        UserContextDto {
            user: self.user.into_dto(),
            registrations: self
                .registrations
                .into_iter()
                .map(Registration::into_dto)
                .collect(),
            upcoming_schedule: self
                .upcoming_schedule
                .into_iter()
                .map(ScheduleItem::into_dto)
                .collect(),
            overdue_schedule: self
                .overdue_schedule
                .into_iter()
                .map(ScheduleItem::into_dto)
                .collect(),
            schedule_statistics: self.schedule_statistics.into_dto(),
        }
    }
}
