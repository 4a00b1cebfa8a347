use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
pub enum ScheduleItemTypeDto {
    Personal,
    Activity,
    Reminder,
    Meeting,
    Study,
    Other,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, ToSchema)]
pub enum ScheduleItemPriorityDto {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ScheduleItemDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub item_type: ScheduleItemTypeDto,
    pub priority: ScheduleItemPriorityDto,
    pub color: Option<String>,
    pub is_completed: bool,
    pub note: Option<String>,
    pub activity_id: Option<i32>,
    pub activity_title: Option<String>,
    pub activity_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateScheduleItemDto {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub item_type: ScheduleItemTypeDto,
    pub priority: ScheduleItemPriorityDto,
    /// Hex color in `#RRGGBB` form.
    pub color: Option<String>,
    pub note: Option<String>,
    pub activity_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateScheduleItemDto {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub item_type: ScheduleItemTypeDto,
    pub priority: ScheduleItemPriorityDto,
    pub color: Option<String>,
    pub is_completed: bool,
    pub note: Option<String>,
    pub activity_id: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedScheduleItemsDto {
    pub items: Vec<ScheduleItemDto>,
    pub total_count: u64,
    pub page_index: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CalendarDayDto {
    pub date: NaiveDate,
    pub items: Vec<ScheduleItemDto>,
    pub total_count: u64,
    pub completed_count: u64,
    pub pending_count: u64,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ScheduleStatisticsDto {
    pub total_items: u64,
    pub completed_items: u64,
    pub pending_items: u64,
    pub overdue_items: u64,
    /// Percentage of completed items, 0 to 100.
    pub completion_rate: f64,
    pub items_by_type: BTreeMap<String, u64>,
    pub items_by_priority: BTreeMap<String, u64>,
}
