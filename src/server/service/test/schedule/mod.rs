use crate::server::{
    error::AppError,
    model::schedule::ScheduleItemParams,
    service::schedule::ScheduleService,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use entity::enums::{ScheduleItemPriority, ScheduleItemType};
use test_utils::{builder::TestBuilder, factory};

mod activity_link;
mod calendar;
mod items;

fn params(title: &str) -> ScheduleItemParams {
    let start = Utc::now() + Duration::days(2);
    ScheduleItemParams {
        title: title.to_string(),
        description: None,
        location: Some("Dorm".to_string()),
        start_time: start,
        end_time: start + Duration::hours(1),
        item_type: ScheduleItemType::Study,
        priority: ScheduleItemPriority::High,
        color: None,
        is_completed: false,
        note: None,
        activity_id: None,
    }
}
