use crate::server::{
    data::recommendation::RecommendationRepository, model::recommendation::SnapshotEntry,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
