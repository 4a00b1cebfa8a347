//! Recommendation service.
//!
//! Three strategies rank the currently registerable activities for a user:
//!
//! - **Collaborative**: users whose registration sets overlap the user's (Jaccard
//!   similarity) vote for the activities they joined.
//! - **Content-based**: the user's category weights plus linear popularity, scaled by
//!   how soon the activity starts.
//! - **Hybrid**: category weights blended with a logistic popularity curve, scaled by
//!   the same time decay.
//!
//! The per-strategy lists are cached per user. Snapshots of hybrid scores are persisted to
//! `activity_recommendation` on demand and by the hourly refresh job.

pub mod scoring;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::server::{
    cache::{recommendations_key, AppCache, MEDIUM_TTL},
    data::{
        activity::ActivityRepository, category::CategoryRepository,
        preference::PreferenceRepository, recommendation::RecommendationRepository,
        registration::RegistrationRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        activity::Activity,
        recommendation::{Preference, Recommendation, SnapshotEntry},
    },
};

use self::scoring::{Candidate, HYBRID_THRESHOLD, SIMILARITY_THRESHOLD};

/// Upper bound on recommendations per request; also the size of each cached list.
pub const MAX_RECOMMENDATIONS: usize = 20;

/// Number of most similar users consulted by collaborative filtering.
const MAX_SIMILAR_USERS: usize = 10;

const COLLABORATIVE_REASON: &str = "Popular with users who joined similar activities";
const CONTENT_REASON: &str = "Matches your category preferences";
const HYBRID_REASON: &str = "Fits your interests and is filling up";

pub struct RecommendationService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a AppCache,
}

impl<'a> RecommendationService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a AppCache) -> Self {
        Self { db, cache }
    }

    /// Combined recommendations for `count` (clamped to `[1, MAX_RECOMMENDATIONS]`).
    ///
    /// Concatenates collaborative (`count / 2`), content-based (`count / 2`) and hybrid
    /// (`count`) results, keeps the first occurrence of each activity and truncates to
    /// `count`. The per-strategy lists are cached per user at full size; each request
    /// combines its own prefixes of them.
    pub async fn recommended(
        &self,
        user_id: i32,
        count: usize,
    ) -> Result<Vec<Recommendation>, AppError> {
        let count = count.clamp(1, MAX_RECOMMENDATIONS);
        let key = recommendations_key(user_id);

        let lists = match self.cache.get_json::<StrategyLists>(&key).await {
            Some(cached) => cached,
            None => {
                let fresh = StrategyLists {
                    collaborative: self.collaborative(user_id, MAX_RECOMMENDATIONS).await?,
                    content_based: self.content_based(user_id, MAX_RECOMMENDATIONS).await?,
                    hybrid: self.hybrid(user_id, MAX_RECOMMENDATIONS).await?,
                };
                self.cache.set_json(&key, &fresh, MEDIUM_TTL).await;
                fresh
            }
        };

        Ok(lists.combine(count))
    }

    /// Activities joined by the users most similar to `user_id`.
    ///
    /// Similarity is the Jaccard index of `Registered` activity sets. Users above
    /// `SIMILARITY_THRESHOLD` are kept, the ten most similar are consulted (ties by user
    /// ID), and each candidate scores the sum of similarities of the users holding it.
    /// Activities the user already joined are excluded.
    pub async fn collaborative(
        &self,
        user_id: i32,
        count: usize,
    ) -> Result<Vec<Recommendation>, AppError> {
        let sets = RegistrationRepository::new(self.db)
            .find_all_registered_sets()
            .await?;
        let empty = BTreeSet::new();
        let own = sets.get(&user_id).unwrap_or(&empty);

        let similar = scoring::rank(
            sets.iter()
                .filter(|(other_id, _)| **other_id != user_id)
                .map(|(other_id, other)| (*other_id, scoring::jaccard(own, other)))
                .filter(|(_, similarity)| *similarity > SIMILARITY_THRESHOLD)
                .collect(),
            MAX_SIMILAR_USERS,
        );

        let candidates = self.candidates(Utc::now()).await?;
        let candidate_ids: HashSet<i32> = candidates
            .iter()
            .map(|a| a.id)
            .filter(|id| !own.contains(id))
            .collect();

        let mut votes: HashMap<i32, f64> = HashMap::new();
        for (other_id, similarity) in &similar {
            let Some(other) = sets.get(other_id) else {
                continue;
            };
            for activity_id in other.iter().filter(|id| candidate_ids.contains(*id)) {
                *votes.entry(*activity_id).or_insert(0.0) += similarity;
            }
        }

        let ranked = scoring::rank(votes.into_iter().collect(), count);
        Ok(attach(candidates, ranked, COLLABORATIVE_REASON))
    }

    /// Candidates ranked by category preference and linear popularity.
    pub async fn content_based(
        &self,
        user_id: i32,
        count: usize,
    ) -> Result<Vec<Recommendation>, AppError> {
        let now = Utc::now();
        let weights = PreferenceRepository::new(self.db)
            .find_weights(user_id)
            .await?;
        let candidates = self.candidates(now).await?;

        let scored = candidates
            .iter()
            .map(|a| {
                let weight = weights.get(&a.category_id).copied();
                (a.id, scoring::content_score(&candidate(a), weight, now))
            })
            .collect();

        let ranked = scoring::rank(scored, count);
        Ok(attach(candidates, ranked, CONTENT_REASON))
    }

    /// Candidates ranked by the hybrid score, excluding the user's own registrations.
    ///
    /// Only scores above `HYBRID_THRESHOLD` are returned.
    pub async fn hybrid(
        &self,
        user_id: i32,
        count: usize,
    ) -> Result<Vec<Recommendation>, AppError> {
        let ranked = self.hybrid_scores(user_id, count, Utc::now()).await?;
        let ids: Vec<i32> = ranked.iter().map(|(id, _)| *id).collect();
        let activities = ActivityRepository::new(self.db).find_by_ids(&ids).await?;

        Ok(attach(activities, ranked, HYBRID_REASON))
    }

    /// The user's category weights with category names.
    pub async fn get_preferences(&self, user_id: i32) -> Result<Vec<Preference>, AppError> {
        Ok(PreferenceRepository::new(self.db).find_by_user(user_id).await?)
    }

    /// Sets the user's weight for a category and drops their cached recommendations.
    ///
    /// # Returns
    /// - `Ok(Preference)` - The stored preference
    /// - `Err(AppError::BadRequest)` - Weight outside `[0, 1]`
    /// - `Err(AppError::NotFound)` - Category does not exist
    pub async fn update_preference(
        &self,
        user_id: i32,
        category_id: i32,
        weight: f64,
    ) -> Result<Preference, AppError> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(AppError::BadRequest(
                "Weight must be between 0 and 1".to_string(),
            ));
        }

        let category = CategoryRepository::new(self.db)
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))?;

        let row = PreferenceRepository::new(self.db)
            .upsert(user_id, category_id, weight)
            .await?;
        self.cache.remove(&recommendations_key(user_id)).await;

        Ok(Preference::from_entity(row, category.name))
    }

    /// Drops the user's cached list and rewrites their snapshot rows from hybrid scores.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of snapshot rows written
    pub async fn recalculate(&self, user_id: i32) -> Result<usize, AppError> {
        self.cache.remove(&recommendations_key(user_id)).await;

        let entries: Vec<SnapshotEntry> = self
            .hybrid_scores(user_id, MAX_RECOMMENDATIONS, Utc::now())
            .await?
            .into_iter()
            .map(|(activity_id, score)| SnapshotEntry {
                activity_id,
                score,
                reason: HYBRID_REASON.to_string(),
            })
            .collect();

        let txn = self.db.begin().await?;
        RecommendationRepository::new(&txn)
            .replace_for_user(user_id, &entries)
            .await?;
        txn.commit().await?;

        tracing::debug!(
            "Recalculated {} recommendations for user {}",
            entries.len(),
            user_id
        );

        Ok(entries.len())
    }

    /// Recalculates snapshots for every active user.
    ///
    /// A failure for one user is logged and does not stop the others.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of users refreshed successfully
    /// - `Err(AppError::DbErr)` - Failed to list users
    pub async fn refresh_all(&self) -> Result<usize, AppError> {
        let user_ids = UserRepository::new(self.db).find_active_ids().await?;

        let mut refreshed = 0;
        for user_id in user_ids {
            match self.recalculate(user_id).await {
                Ok(_) => refreshed += 1,
                Err(e) => tracing::error!(
                    "Failed to refresh recommendations for user {}: {}",
                    user_id,
                    e
                ),
            }
        }

        Ok(refreshed)
    }

    /// Ranked `(activity_id, score)` pairs above `HYBRID_THRESHOLD`.
    async fn hybrid_scores(
        &self,
        user_id: i32,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<(i32, f64)>, AppError> {
        let weights = PreferenceRepository::new(self.db)
            .find_weights(user_id)
            .await?;
        let registered: HashSet<i32> = RegistrationRepository::new(self.db)
            .find_registered_activity_ids(user_id)
            .await?
            .into_iter()
            .collect();

        let scored = self
            .candidates(now)
            .await?
            .iter()
            .filter(|a| !registered.contains(&a.id))
            .map(|a| {
                let weight = weights.get(&a.category_id).copied();
                (a.id, scoring::hybrid_score(&candidate(a), weight, now))
            })
            .filter(|(_, score)| *score > HYBRID_THRESHOLD)
            .collect();

        Ok(scoring::rank(scored, count))
    }

    /// Published activities still open for registration.
    async fn candidates(&self, now: DateTime<Utc>) -> Result<Vec<Activity>, AppError> {
        Ok(ActivityRepository::new(self.db)
            .find_registerable(now)
            .await?)
    }
}

/// Full-size ranked lists for one user, as stored in the cache.
#[derive(Serialize, Deserialize)]
struct StrategyLists {
    collaborative: Vec<Recommendation>,
    content_based: Vec<Recommendation>,
    hybrid: Vec<Recommendation>,
}

impl StrategyLists {
    /// Takes `count / 2` collaborative, `count / 2` content-based and `count` hybrid
    /// entries in that order, drops repeated activities and truncates to `count`.
    fn combine(self, count: usize) -> Vec<Recommendation> {
        let half = count / 2;
        let mut seen = HashSet::new();

        self.collaborative
            .into_iter()
            .take(half)
            .chain(self.content_based.into_iter().take(half))
            .chain(self.hybrid.into_iter().take(count))
            .filter(|r| seen.insert(r.activity.id))
            .take(count)
            .collect()
    }
}

fn candidate(activity: &Activity) -> Candidate {
    Candidate {
        activity_id: activity.id,
        current_participants: activity.current_participants,
        max_participants: activity.max_participants,
        start_time: activity.start_time,
    }
}

/// Pairs ranked scores with their activities, preserving rank order.
fn attach(activities: Vec<Activity>, ranked: Vec<(i32, f64)>, reason: &str) -> Vec<Recommendation> {
    let mut by_id: HashMap<i32, Activity> = activities.into_iter().map(|a| (a.id, a)).collect();

    ranked
        .into_iter()
        .filter_map(|(activity_id, score)| {
            by_id.remove(&activity_id).map(|activity| Recommendation {
                activity,
                score,
                reason: reason.to_string(),
            })
        })
        .collect()
}
