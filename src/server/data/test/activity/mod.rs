use crate::server::{
    data::activity::ActivityRepository,
    model::{
        activity::{ActivityParams, ActivitySearchParams, ActivitySort},
        pagination::PageRequest,
    },
};
use chrono::{Duration, Utc};
use entity::enums::ActivityStatus;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod participants;
mod search;

fn params(category_id: i32) -> ActivityParams {
    let start = Utc::now() + Duration::days(5);
    ActivityParams {
        title: "Robotics Workshop".to_string(),
        description: "Build a line follower".to_string(),
        location: "Lab 3".to_string(),
        start_time: start,
        end_time: start + Duration::hours(3),
        registration_deadline: start - Duration::days(1),
        max_participants: 25,
        image_url: None,
        category_id,
        tags: vec!["robots".to_string(), "hardware".to_string()],
    }
}
