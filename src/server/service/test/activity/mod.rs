use crate::server::{
    cache::AppCache,
    data::{activity::ActivityRepository, schedule::ScheduleRepository},
    error::{registration::RegistrationError, AppError},
    model::activity::{ActivityParams, ActivitySearchParams},
    service::activity::ActivityService,
};
use chrono::{Duration, Utc};
use entity::enums::{ActivityStatus, RegistrationStatus};
use test_utils::{builder::TestBuilder, factory};

mod cancel;
mod query;
mod register;

fn params(category_id: i32) -> ActivityParams {
    let start = Utc::now() + Duration::days(4);
    ActivityParams {
        title: "Chess Night".to_string(),
        description: "Casual rapid games".to_string(),
        location: "Library Room 2".to_string(),
        start_time: start,
        end_time: start + Duration::hours(2),
        registration_deadline: start - Duration::hours(12),
        max_participants: 16,
        image_url: None,
        category_id,
        tags: vec!["chess".to_string()],
    }
}
