use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::activity::ActivityDto;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct RecommendationDto {
    pub activity: ActivityDto,
    pub score: f64,
    pub reason: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PreferenceDto {
    pub category_id: i32,
    pub category_name: String,
    pub weight: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdatePreferenceDto {
    pub category_id: i32,
    /// Affinity in the range 0.0 to 1.0.
    pub weight: f64,
}
