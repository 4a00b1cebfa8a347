//! In-process TTL cache for read-heavy queries.
//!
//! Values are stored as serialized JSON with a per-entry time-to-live, so one cache
//! instance serves categories, popular activities and per-user recommendations with
//! different lifetimes. A value that fails to deserialize is treated as a miss and
//! evicted, which lets callers always fall back to the database.

use moka::{future::Cache, Expiry};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// Lifetime for popular activities and recommendations.
pub const MEDIUM_TTL: Duration = Duration::from_secs(30 * 60);
/// Lifetime for categories.
pub const LONG_TTL: Duration = Duration::from_secs(60 * 60);

const MAX_ENTRIES: u64 = 10_000;

pub const CATEGORIES_KEY: &str = "categories";
pub const POPULAR_ACTIVITIES_KEY: &str = "popular_activities";

/// Cache key holding a user's combined recommendations.
pub fn recommendations_key(user_id: i32) -> String {
    format!("recommended_activities_{}", user_id)
}

#[derive(Clone)]
struct CachedValue {
    payload: Arc<str>,
    ttl: Duration,
}

struct PerEntryExpiry;

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Cheaply cloneable handle to the shared cache.
#[derive(Clone)]
pub struct AppCache {
    inner: Cache<String, CachedValue>,
}

impl AppCache {
    pub fn new() -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .expire_after(PerEntryExpiry)
            .build();

        Self { inner }
    }

    /// Returns the cached value for `key`, or `None` on a miss or a corrupt entry.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cached = self.inner.get(key).await?;

        match serde_json::from_str(&cached.payload) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Evicting unreadable cache entry {}: {}", key, e);
                self.inner.invalidate(key).await;
                None
            }
        }
    }

    /// Stores `value` under `key` for `ttl`. Serialization failures are logged and skipped.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        match serde_json::to_string(value) {
            Ok(payload) => {
                self.inner
                    .insert(
                        key.to_string(),
                        CachedValue {
                            payload: payload.into(),
                            ttl,
                        },
                    )
                    .await;
            }
            Err(e) => tracing::warn!("Skipping cache write for {}: {}", key, e),
        }
    }

    pub async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}
