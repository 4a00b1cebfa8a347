use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
pub enum ActivityStatusDto {
    Draft,
    Published,
    Cancelled,
    Completed,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ActivityTagDto {
    pub id: i32,
    pub tag_name: String,
    pub color: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ActivityDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: Option<String>,
    pub status: ActivityStatusDto,
    pub category_id: i32,
    pub category_name: String,
    pub created_by: Option<i32>,
    pub creator_name: Option<String>,
    pub tags: Vec<ActivityTagDto>,
    pub created_at: DateTime<Utc>,
    /// Whether the requesting user holds an active registration.
    pub is_registered: bool,
    /// Published, before the deadline, and not full.
    pub can_register: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateActivityDto {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub image_url: Option<String>,
    pub category_id: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateActivityDto {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub image_url: Option<String>,
    pub category_id: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateActivityStatusDto {
    pub status: ActivityStatusDto,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedActivitiesDto {
    pub items: Vec<ActivityDto>,
    pub total_count: u64,
    pub page_index: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}
