//! Recommendation and preference domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::recommendation::{PreferenceDto, RecommendationDto},
    server::model::activity::Activity,
};

/// A scored activity suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub activity: Activity,
    pub score: f64,
    pub reason: String,
}

impl Recommendation {
    pub fn into_dto(self) -> RecommendationDto {
        RecommendationDto {
            activity: self.activity.into_dto(),
            score: self.score,
            reason: self.reason,
        }
    }
}

/// A user's weight for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    pub category_id: i32,
    pub category_name: String,
    pub weight: f64,
    pub last_updated: DateTime<Utc>,
}

impl Preference {
    pub fn from_entity(
        entity: entity::user_activity_preference::Model,
        category_name: String,
    ) -> Self {
        Self {
            category_id: entity.category_id,
            category_name,
            weight: entity.weight,
            last_updated: entity.last_updated,
        }
    }

    pub fn into_dto(self) -> PreferenceDto {
        PreferenceDto {
            category_id: self.category_id,
            category_name: self.category_name,
            weight: self.weight,
            last_updated: self.last_updated,
        }
    }
}

/// Score row written to the recommendation snapshot table.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub activity_id: i32,
    pub score: f64,
    pub reason: String,
}
