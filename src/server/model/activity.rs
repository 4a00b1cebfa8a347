//! Activity domain models and parameters.

use chrono::{DateTime, Utc};
use entity::enums::ActivityStatus;
use serde::{Deserialize, Serialize};

use crate::{
    model::activity::{
        ActivityDto, ActivityStatusDto, ActivityTagDto, CreateActivityDto,
        PaginatedActivitiesDto, UpdateActivityDto,
    },
    server::{
        error::AppError,
        model::pagination::{PageRequest, Paged},
        util::validation::{check_length, check_max_length, check_time_range},
    },
};

/// Activity with its category name, creator name and tags resolved.
///
/// Serializable so popular and recommended lists can be cached. `is_registered` is
/// always false in cached copies and is filled per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
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
    pub status: ActivityStatus,
    pub category_id: i32,
    pub category_name: String,
    pub created_by: Option<i32>,
    pub creator_name: Option<String>,
    pub tags: Vec<ActivityTag>,
    pub created_at: DateTime<Utc>,
    pub is_registered: bool,
}

impl Activity {
    /// Builds the domain model from an entity row and its resolved relations.
    ///
    /// # Arguments
    /// - `entity` - Activity row
    /// - `category_name` - Name of the activity's category
    /// - `creator_name` - Full name of the creating user, if known
    /// - `tags` - Tags attached to the activity
    pub fn from_entity(
        entity: entity::activity::Model,
        category_name: String,
        creator_name: Option<String>,
        tags: Vec<ActivityTag>,
    ) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            start_time: entity.start_time,
            end_time: entity.end_time,
            registration_deadline: entity.registration_deadline,
            max_participants: entity.max_participants,
            current_participants: entity.current_participants,
            image_url: entity.image_url,
            status: entity.status,
            category_id: entity.category_id,
            category_name,
            created_by: entity.created_by,
            creator_name,
            tags,
            created_at: entity.created_at,
            is_registered: false,
        }
    }

    /// Whether a new registration would be accepted at `now`.
    pub fn can_register_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ActivityStatus::Published
            && self.registration_deadline > now
            && self.current_participants < self.max_participants
    }

    pub fn into_dto(self) -> ActivityDto {
        let can_register = self.can_register_at(Utc::now());
        ActivityDto {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            registration_deadline: self.registration_deadline,
            max_participants: self.max_participants,
            current_participants: self.current_participants,
            image_url: self.image_url,
            status: self.status.into(),
            category_id: self.category_id,
            category_name: self.category_name,
            created_by: self.created_by,
            creator_name: self.creator_name,
            tags: self.tags.into_iter().map(ActivityTag::into_dto).collect(),
            created_at: self.created_at,
            is_registered: self.is_registered,
            can_register,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTag {
    pub id: i32,
    pub tag_name: String,
    pub color: Option<String>,
}

impl ActivityTag {
    pub fn from_entity(entity: entity::activity_tag::Model) -> Self {
        Self {
            id: entity.id,
            tag_name: entity.tag_name,
            color: entity.color,
        }
    }

    pub fn into_dto(self) -> ActivityTagDto {
        ActivityTagDto {
            id: self.id,
            tag_name: self.tag_name,
            color: self.color,
        }
    }
}

impl From<ActivityStatus> for ActivityStatusDto {
    fn from(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Draft => Self::Draft,
            ActivityStatus::Published => Self::Published,
            ActivityStatus::Cancelled => Self::Cancelled,
            ActivityStatus::Completed => Self::Completed,
        }
    }
}

impl From<ActivityStatusDto> for ActivityStatus {
    fn from(status: ActivityStatusDto) -> Self {
        match status {
            ActivityStatusDto::Draft => Self::Draft,
            ActivityStatusDto::Published => Self::Published,
            ActivityStatusDto::Cancelled => Self::Cancelled,
            ActivityStatusDto::Completed => Self::Completed,
        }
    }
}

/// Writable activity fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ActivityParams {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub max_participants: i32,
    pub image_url: Option<String>,
    pub category_id: i32,
    pub tags: Vec<String>,
}

impl ActivityParams {
    pub fn from_create_dto(dto: CreateActivityDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location.trim().to_string(),
            start_time: dto.start_time,
            end_time: dto.end_time,
            registration_deadline: dto.registration_deadline,
            max_participants: dto.max_participants,
            image_url: dto.image_url,
            category_id: dto.category_id,
            tags: normalize_tags(dto.tags),
        }
    }

    pub fn from_update_dto(dto: UpdateActivityDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location.trim().to_string(),
            start_time: dto.start_time,
            end_time: dto.end_time,
            registration_deadline: dto.registration_deadline,
            max_participants: dto.max_participants,
            image_url: dto.image_url,
            category_id: dto.category_id,
            tags: normalize_tags(dto.tags),
        }
    }

    /// Checks field lengths, capacity and the time ordering
    /// `registration_deadline <= start_time < end_time`.
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("Title", &self.title, 1, 200)?;
        check_length("Description", &self.description, 0, 2000)?;
        check_length("Location", &self.location, 0, 200)?;
        check_max_length("Image URL", self.image_url.as_deref(), 500)?;

        if self.max_participants < 1 {
            return Err(AppError::BadRequest(
                "Max participants must be at least 1".to_string(),
            ));
        }

        check_time_range(self.start_time, self.end_time)?;

        if self.registration_deadline > self.start_time {
            return Err(AppError::BadRequest(
                "Registration deadline must not be after the start time".to_string(),
            ));
        }

        for tag in &self.tags {
            check_length("Tag", tag, 1, 50)?;
        }

        Ok(())
    }
}

/// Trims tags, drops empty ones and removes duplicates while keeping order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}

/// Sort keys accepted by activity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivitySort {
    #[default]
    StartTime,
    CreatedAt,
    Title,
}

impl ActivitySort {
    /// Parses a sort key case-insensitively. Unknown keys fall back to start time.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("createdat") | Some("created_at") => Self::CreatedAt,
            Some("title") => Self::Title,
            _ => Self::StartTime,
        }
    }
}

/// Filters, ordering and paging for activity search.
#[derive(Debug, Clone)]
pub struct ActivitySearchParams {
    pub keyword: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<ActivityStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Only `Some(true)` filters; `Some(false)` and `None` return everything.
    pub registerable: Option<bool>,
    pub sort_by: ActivitySort,
    pub descending: bool,
    pub page: PageRequest,
}

impl Default for ActivitySearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            category_id: None,
            status: None,
            start_date: None,
            end_date: None,
            location: None,
            registerable: None,
            sort_by: ActivitySort::StartTime,
            descending: false,
            page: PageRequest::new(None, None, 10),
        }
    }
}

impl Paged<Activity> {
    pub fn into_dto(self) -> PaginatedActivitiesDto {
        PaginatedActivitiesDto {
            total_pages: self.total_pages(),
            has_previous_page: self.has_previous_page(),
            has_next_page: self.has_next_page(),
            total_count: self.total_count,
            page_index: self.page_index,
            page_size: self.page_size,
            items: self.items.into_iter().map(Activity::into_dto).collect(),
        }
    }
}
