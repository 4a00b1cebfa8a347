use crate::server::{
    data::schedule::{ScheduleRepository, ACTIVITY_ITEM_COLOR},
    model::schedule::{ScheduleItemParams, ScheduleSearchParams},
};
use chrono::{Duration, Utc};
use entity::enums::{ScheduleItemPriority, ScheduleItemType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_upcoming;
mod ownership;
mod search;
