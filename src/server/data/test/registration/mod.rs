use crate::server::data::registration::RegistrationRepository;
use entity::enums::RegistrationStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_activity;
