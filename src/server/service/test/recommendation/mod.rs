use crate::server::{
    cache::{recommendations_key, AppCache},
    data::recommendation::RecommendationRepository,
    error::AppError,
    model::recommendation::Recommendation,
    service::recommendation::RecommendationService,
};
use test_utils::{builder::TestBuilder, factory};

mod preference;
mod snapshot;
