//! Schedule item domain models, parameters and aggregates.

use chrono::{DateTime, NaiveDate, Utc};
use entity::enums::{ScheduleItemPriority, ScheduleItemType};
use std::collections::BTreeMap;

use crate::{
    model::schedule::{
        CalendarDayDto, CreateScheduleItemDto, PaginatedScheduleItemsDto,
        ScheduleItemDto, ScheduleItemPriorityDto, ScheduleItemTypeDto, ScheduleStatisticsDto,
        UpdateScheduleItemDto,
    },
    server::{
        error::AppError,
        model::pagination::{PageRequest, Paged},
        util::validation::{check_length, check_max_length, check_time_range, is_hex_color},
    },
};

/// Schedule item with the linked activity's title and location resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub item_type: ScheduleItemType,
    pub priority: ScheduleItemPriority,
    pub color: Option<String>,
    pub is_completed: bool,
    pub note: Option<String>,
    pub activity_id: Option<i32>,
    pub activity_title: Option<String>,
    pub activity_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduleItem {
    /// Converts an entity row, attaching the linked activity when it was loaded.
    pub fn from_entity(
        entity: entity::schedule_item::Model,
        activity: Option<&entity::activity::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            start_time: entity.start_time,
            end_time: entity.end_time,
            item_type: entity.item_type,
            priority: entity.priority,
            color: entity.color,
            is_completed: entity.is_completed,
            note: entity.note,
            activity_id: entity.activity_id,
            activity_title: activity.map(|a| a.title.clone()),
            activity_location: activity.map(|a| a.location.clone()),
            created_at: entity.created_at,
        }
    }

    /// Not completed and already ended at `now`.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.end_time <= now
    }

    pub fn into_dto(self) -> ScheduleItemDto {
        ScheduleItemDto {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            item_type: self.item_type.into(),
            priority: self.priority.into(),
            color: self.color,
            is_completed: self.is_completed,
            note: self.note,
            activity_id: self.activity_id,
            activity_title: self.activity_title,
            activity_location: self.activity_location,
            created_at: self.created_at,
        }
    }
}

impl From<ScheduleItemType> for ScheduleItemTypeDto {
    fn from(item_type: ScheduleItemType) -> Self {
        match item_type {
            ScheduleItemType::Personal => Self::Personal,
            ScheduleItemType::Activity => Self::Activity,
            ScheduleItemType::Reminder => Self::Reminder,
            ScheduleItemType::Meeting => Self::Meeting,
            ScheduleItemType::Study => Self::Study,
            ScheduleItemType::Other => Self::Other,
        }
    }
}

impl From<ScheduleItemTypeDto> for ScheduleItemType {
    fn from(item_type: ScheduleItemTypeDto) -> Self {
        match item_type {
            ScheduleItemTypeDto::Personal => Self::Personal,
            ScheduleItemTypeDto::Activity => Self::Activity,
            ScheduleItemTypeDto::Reminder => Self::Reminder,
            ScheduleItemTypeDto::Meeting => Self::Meeting,
            ScheduleItemTypeDto::Study => Self::Study,
            ScheduleItemTypeDto::Other => Self::Other,
        }
    }
}

impl From<ScheduleItemPriority> for ScheduleItemPriorityDto {
    fn from(priority: ScheduleItemPriority) -> Self {
        match priority {
            ScheduleItemPriority::Low => Self::Low,
            ScheduleItemPriority::Medium => Self::Medium,
            ScheduleItemPriority::High => Self::High,
            ScheduleItemPriority::Urgent => Self::Urgent,
        }
    }
}

impl From<ScheduleItemPriorityDto> for ScheduleItemPriority {
    fn from(priority: ScheduleItemPriorityDto) -> Self {
        match priority {
            ScheduleItemPriorityDto::Low => Self::Low,
            ScheduleItemPriorityDto::Medium => Self::Medium,
            ScheduleItemPriorityDto::High => Self::High,
            ScheduleItemPriorityDto::Urgent => Self::Urgent,
        }
    }
}

/// Label used as the key in per-type statistics.
pub fn type_label(item_type: ScheduleItemType) -> &'static str {
    match item_type {
        ScheduleItemType::Personal => "Personal",
        ScheduleItemType::Activity => "Activity",
        ScheduleItemType::Reminder => "Reminder",
        ScheduleItemType::Meeting => "Meeting",
        ScheduleItemType::Study => "Study",
        ScheduleItemType::Other => "Other",
    }
}

/// Label used as the key in per-priority statistics.
pub fn priority_label(priority: ScheduleItemPriority) -> &'static str {
    match priority {
        ScheduleItemPriority::Low => "Low",
        ScheduleItemPriority::Medium => "Medium",
        ScheduleItemPriority::High => "High",
        ScheduleItemPriority::Urgent => "Urgent",
    }
}

/// Writable schedule item fields. Creation always starts with `is_completed = false`.
#[derive(Debug, Clone)]
pub struct ScheduleItemParams {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub item_type: ScheduleItemType,
    pub priority: ScheduleItemPriority,
    pub color: Option<String>,
    pub is_completed: bool,
    pub note: Option<String>,
    pub activity_id: Option<i32>,
}

impl ScheduleItemParams {
    pub fn from_create_dto(dto: CreateScheduleItemDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location,
            start_time: dto.start_time,
            end_time: dto.end_time,
            item_type: dto.item_type.into(),
            priority: dto.priority.into(),
            color: dto.color,
            is_completed: false,
            note: dto.note,
            activity_id: dto.activity_id,
        }
    }

    pub fn from_update_dto(dto: UpdateScheduleItemDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location,
            start_time: dto.start_time,
            end_time: dto.end_time,
            item_type: dto.item_type.into(),
            priority: dto.priority.into(),
            color: dto.color,
            is_completed: dto.is_completed,
            note: dto.note,
            activity_id: dto.activity_id,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        check_length("Title", &self.title, 1, 200)?;
        check_max_length("Description", self.description.as_deref(), 1000)?;
        check_max_length("Location", self.location.as_deref(), 200)?;
        check_max_length("Note", self.note.as_deref(), 1000)?;
        check_time_range(self.start_time, self.end_time)?;

        if let Some(color) = &self.color {
            if !is_hex_color(color) {
                return Err(AppError::BadRequest(
                    "Color must be in #RRGGBB format".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Filters and paging for schedule search, always scoped to one user.
#[derive(Debug, Clone)]
pub struct ScheduleSearchParams {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub item_type: Option<ScheduleItemType>,
    pub priority: Option<ScheduleItemPriority>,
    pub is_completed: Option<bool>,
    pub keyword: Option<String>,
    pub page: PageRequest,
}

impl Default for ScheduleSearchParams {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            item_type: None,
            priority: None,
            is_completed: None,
            keyword: None,
            page: PageRequest::new(None, None, 20),
        }
    }
}

impl Paged<ScheduleItem> {
    pub fn into_dto(self) -> PaginatedScheduleItemsDto {
        PaginatedScheduleItemsDto {
            total_pages: self.total_pages(),
            has_previous_page: self.has_previous_page(),
            has_next_page: self.has_next_page(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
            items: self.items.into_iter().map(ScheduleItem::into_dto).collect(),
        }
    }
}

/// Items starting on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub items: Vec<ScheduleItem>,
}

impl CalendarDay {
    pub fn completed_count(&self) -> u64 {
        self.items.iter().filter(|i| i.is_completed).count() as u64
    }

    pub fn into_dto(self) -> CalendarDayDto {
        let total_count = self.items.len() as u64;
        let completed_count = self.completed_count();
        CalendarDayDto {
            date: self.date,
            total_count,
            completed_count,
            pending_count: total_count - completed_count,
            items: self.items.into_iter().map(ScheduleItem::into_dto).collect(),
        }
    }
}

/// Completion counts for a user's schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleStatistics {
    pub total_items: u64,
    pub completed_items: u64,
    /// Not completed and not yet ended.
    pub pending_items: u64,
    /// Not completed and already ended.
    pub overdue_items: u64,
    pub items_by_type: BTreeMap<String, u64>,
    pub items_by_priority: BTreeMap<String, u64>,
}

impl ScheduleStatistics {
    /// Tallies statistics over `items` as of `now`.
    pub fn from_items(items: &[ScheduleItem], now: DateTime<Utc>) -> Self {
        let mut stats = Self {
            total_items: items.len() as u64,
            ..Default::default()
        };

        for item in items {
            if item.is_completed {
                stats.completed_items += 1;
            } else if item.is_overdue_at(now) {
                stats.overdue_items += 1;
            } else {
                stats.pending_items += 1;
            }

            *stats
                .items_by_type
                .entry(type_label(item.item_type).to_string())
                .or_insert(0) += 1;
            *stats
                .items_by_priority
                .entry(priority_label(item.priority).to_string())
                .or_insert(0) += 1;
        }

        stats
    }

    /// Completed items as a percentage, or 0 when there are no items.
    pub fn completion_rate(&self) -> f64 {
        if self.total_items == 0 {
            return 0.0;
        }
        self.completed_items as f64 / self.total_items as f64 * 100.0
    }

    pub fn into_dto(self) -> ScheduleStatisticsDto {
        ScheduleStatisticsDto {
            completion_rate: self.completion_rate(),
            total_items: self.total_items,
            completed_items: self.completed_items,
            pending_items: self.pending_items,
            overdue_items: self.overdue_items,
            items_by_type: self.items_by_type,
            items_by_priority: self.items_by_priority,
        }
    }
}
