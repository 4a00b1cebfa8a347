//! Pure recommendation scoring functions.
//!
//! Every function takes its inputs explicitly, including `now`, so results depend only
//! on the arguments.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Preference weight assumed for categories the user never rated.
pub const DEFAULT_CATEGORY_WEIGHT: f64 = 0.1;

/// Minimum Jaccard similarity for another user to count as similar.
pub const SIMILARITY_THRESHOLD: f64 = 0.1;

/// Minimum hybrid score for an activity to be suggested.
pub const HYBRID_THRESHOLD: f64 = 0.1;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Weight favoring activities that start soon.
///
/// Returns 0.0 once the activity has started, 1.0 within 7 days, 0.8 within 30,
/// 0.6 within 90 and 0.4 beyond that.
pub fn time_decay(start_time: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = (start_time - now).num_seconds() as f64 / SECONDS_PER_DAY;

    if days < 0.0 {
        0.0
    } else if days <= 7.0 {
        1.0
    } else if days <= 30.0 {
        0.8
    } else if days <= 90.0 {
        0.6
    } else {
        0.4
    }
}

/// Fill ratio with a mild boost, capped at 1.0.
pub fn linear_popularity(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    let ratio = f64::from(current) / f64::from(max);
    (ratio * 1.2).min(1.0)
}

/// Logistic curve over the fill ratio, centered on half full.
pub fn logistic_popularity(current: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    let ratio = f64::from(current) / f64::from(max);
    1.0 / (1.0 + (-10.0 * (ratio - 0.5)).exp())
}

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`, or 0.0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<i32>, b: &BTreeSet<i32>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Inputs describing one candidate activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub activity_id: i32,
    pub current_participants: i32,
    pub max_participants: i32,
    pub start_time: DateTime<Utc>,
}

/// Content score: `(weight or 0.1 + linear_popularity * 0.2) * time_decay`.
///
/// # Arguments
/// - `candidate` - Activity being scored
/// - `weight` - User's weight for the activity's category, if rated
/// - `now` - Reference time for decay
pub fn content_score(candidate: &Candidate, weight: Option<f64>, now: DateTime<Utc>) -> f64 {
    let base = weight.unwrap_or(DEFAULT_CATEGORY_WEIGHT);
    let popularity = linear_popularity(candidate.current_participants, candidate.max_participants);
    (base + popularity * 0.2) * time_decay(candidate.start_time, now)
}

/// Hybrid score: `(weight * 0.4 + logistic_popularity * 0.3) * time_decay`.
///
/// Unrated categories contribute a weight of 0.
pub fn hybrid_score(candidate: &Candidate, weight: Option<f64>, now: DateTime<Utc>) -> f64 {
    let preference = weight.unwrap_or(0.0);
    let popularity =
        logistic_popularity(candidate.current_participants, candidate.max_participants);
    (preference * 0.4 + popularity * 0.3) * time_decay(candidate.start_time, now)
}

/// Keeps positive scores, sorts by score descending then ID ascending, and truncates.
pub fn rank(mut scored: Vec<(i32, f64)>, count: usize) -> Vec<(i32, f64)> {
    scored.retain(|(_, score)| *score > 0.0);
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    scored.truncate(count);
    scored
}
