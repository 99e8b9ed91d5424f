//! Expiring key-value cache for query results.
//!
//! Entries are keyed by metric name plus the full parameter set and stay
//! valid for a fixed window (5 minutes by default). An expired entry is
//! recomputed on the next access; the only other invalidation is an explicit
//! clear-all. Only successful results are stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;

#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: Instant,
    payload: serde_json::Value,
}

/// Process-wide query-result cache with a fixed validity window.
#[derive(Debug, Clone)]
pub struct QueryCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a still-valid entry. Returns `None` on miss, expiry, or when
    /// the stored payload no longer matches the requested shape.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        serde_json::from_value(entry.payload.clone()).ok()
    }

    /// Store a result under `key`, replacing any previous entry.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                payload,
            },
        );
    }

    /// Drop every entry, returning how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }
}

/// Build a cache key from a metric name and its parameters.
pub fn cache_key(metric: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return metric.to_string();
    }
    let pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{metric}?{}", pairs.join("&"))
}

/// Return the cached value for `key`, or run `fetch`, store its result, and
/// return it. Failed fetches are propagated and never cached.
pub async fn cached<T, F, Fut>(cache: &QueryCache, key: &str, fetch: F) -> Result<T, AppError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if let Some(hit) = cache.get::<T>(key).await {
        return Ok(hit);
    }
    let fresh = fetch().await?;
    cache.put(key, &fresh).await;
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn cache_key_without_params() {
        assert_eq!(cache_key("sales_trend", &[]), "sales_trend");
    }

    #[test]
    fn cache_key_includes_all_params() {
        let key = cache_key(
            "inventory_status",
            &[
                ("store", "Baldwin Bikes".to_string()),
                ("status", "Low Stock".to_string()),
            ],
        );
        assert_eq!(key, "inventory_status?store=Baldwin Bikes&status=Low Stock");
    }

    #[tokio::test]
    async fn get_returns_stored_value() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.put("k", &vec![1i64, 2, 3]).await;
        assert_eq!(cache.get::<Vec<i64>>("k").await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn get_misses_after_expiry() {
        let cache = QueryCache::new(Duration::from_millis(10));
        cache.put("k", &42i64).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get::<i64>("k").await, None);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.put("a", &1i64).await;
        cache.put("b", &2i64).await;
        assert_eq!(cache.clear().await, 2);
        assert_eq!(cache.get::<i64>("a").await, None);
    }

    #[tokio::test]
    async fn cached_fetches_once_then_hits() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value = cached(&cache, "k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, AppError>(7i64)
            })
            .await
            .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cached_does_not_store_failures() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let result = cached(&cache, "k", || async {
            Err::<i64, _>(AppError::Query("boom".to_string()))
        })
        .await;
        assert!(result.is_err());

        // Next call sees a miss and can succeed.
        let value = cached(&cache, "k", || async { Ok::<_, AppError>(5i64) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }
}
