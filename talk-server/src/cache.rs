//! Expiring key-value cache for single-item lookups.
//!
//! Memoizes talk detail (`talk:<id>`) and individual teacher names
//! (`teacher:<id>`) as opaque serialized strings with a per-entry TTL.
//! Expiry is lazy: a read past the entry's deadline is a miss and evicts the
//! entry; there is no background sweep. Entries are small and bounded by the
//! talk/teacher id space actually queried, so no capacity limit is set.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;

/// Default TTL for cached entries: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// A cached value together with its time-to-live.
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expiry policy reading the TTL off each entry.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// String key → serialized value store with per-entry expiry.
///
/// One instance is created at process start and injected; tests construct
/// their own so nothing leaks between them.
pub struct ExpiringCache {
    inner: MokaCache<String, Entry>,
}

impl ExpiringCache {
    pub fn new() -> Self {
        Self {
            inner: MokaCache::builder().expire_after(PerEntryTtl).build(),
        }
    }

    /// Get a live entry; expired entries read as a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.map(|e| e.value)
    }

    /// Insert with the default 24-hour TTL.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.insert_with_ttl(key, value, DEFAULT_TTL).await;
    }

    /// Insert with an explicit TTL.
    pub async fn insert_with_ttl(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) {
        self.inner
            .insert(
                key.into(),
                Entry {
                    value: value.into(),
                    ttl,
                },
            )
            .await;
    }

    /// Number of live-ish entries (moka counts lazily; for monitoring only).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ExpiringCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hit_before_expiry() {
        let cache = ExpiringCache::new();
        cache.insert("talk:1", "payload").await;
        assert_eq!(cache.get("talk:1").await.as_deref(), Some("payload"));
    }

    #[tokio::test]
    async fn read_past_expiry_is_a_miss() {
        let cache = ExpiringCache::new();
        cache
            .insert_with_ttl("talk:2", "stale", Duration::from_millis(5))
            .await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("talk:2").await, None);
    }

    #[tokio::test]
    async fn per_entry_ttls_are_independent() {
        let cache = ExpiringCache::new();
        cache
            .insert_with_ttl("short", "a", Duration::from_millis(5))
            .await;
        cache.insert("long", "b").await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.get("long").await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let cache = ExpiringCache::new();
        assert_eq!(cache.get("talk:404").await, None);
    }

    #[tokio::test]
    async fn insert_overwrites() {
        let cache = ExpiringCache::new();
        cache.insert("teacher:3", "Old Name").await;
        cache.insert("teacher:3", "New Name").await;
        assert_eq!(cache.get("teacher:3").await.as_deref(), Some("New Name"));
    }
}
