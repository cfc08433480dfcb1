//! Response caching.
//!
//! Successful GET responses can be stored under a deterministic fingerprint
//! of the endpoint and its parameters, so repeated lookups skip the network
//! entirely. Backends implement [`ResponseCache`]; the bundled
//! [`MemoryCache`] keeps entries in-process with per-entry TTL.

use crate::error::Result;
use async_trait::async_trait;
use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// 128-bit BLAKE2b, rendered as a 32-character hex fingerprint.
type Blake2b128 = Blake2b<U16>;

/// Builds the deterministic cache key for a request.
///
/// Parameters serialize with sorted keys, so two maps holding the same
/// entries produce the same key regardless of insertion order. Requests
/// without parameters hash an empty object.
pub fn cache_key(endpoint: &str, params: Option<&Map<String, Value>>) -> String {
    let canonical = match params {
        Some(map) => Value::Object(map.clone()).to_string(),
        None => "{}".to_string(),
    };
    let mut hasher = Blake2b128::new();
    hasher.update(format!("{endpoint}?{canonical}").as_bytes());
    hex::encode(hasher.finalize())
}

/// Storage backend for cached responses.
///
/// All operations are fallible so that external backends (Redis, disk) can
/// surface I/O errors; the request pipeline treats cache failures as misses
/// rather than request failures.
#[async_trait]
pub trait ResponseCache: Send + Sync + fmt::Debug {
    /// Looks up a cached response body. `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores a response body. `ttl` of `None` falls back to the backend's
    /// default lifetime (unbounded for [`MemoryCache`] without one).
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()>;

    /// Removes a single entry. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Drops every entry.
    async fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// In-process cache with lazy expiry.
///
/// Expired entries are evicted on access rather than by a background sweep,
/// which keeps the implementation lock-cheap at the cost of holding dead
/// entries until the next lookup.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Option<Duration>,
}

impl MemoryCache {
    /// Creates a cache whose entries never expire unless a TTL is given
    /// per `set` call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache applying `ttl` to every entry stored without an
    /// explicit lifetime.
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl: Some(ttl),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let expires_at = ttl.or(self.default_ttl).map(|ttl| Instant::now() + ttl);
        self.lock()
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_cache_key_is_32_hex_chars() {
        let key = cache_key("/v2/product/123/", None);
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_cache_key_ignores_insertion_order() {
        let mut first = Map::new();
        first.insert("page".to_string(), json!(2));
        first.insert("q".to_string(), json!("laptop"));

        let mut second = Map::new();
        second.insert("q".to_string(), json!("laptop"));
        second.insert("page".to_string(), json!(2));

        assert_eq!(
            cache_key("/v1/search/", Some(&first)),
            cache_key("/v1/search/", Some(&second))
        );
    }

    #[test]
    fn test_cache_key_differs_by_endpoint_and_params() {
        let params = map(json!({"page": 1}));
        let base = cache_key("/v1/search/", Some(&params));
        assert_ne!(base, cache_key("/v2/search/", Some(&params)));

        let other = map(json!({"page": 2}));
        assert_ne!(base, cache_key("/v1/search/", Some(&other)));
    }

    #[test]
    fn test_cache_key_none_equals_empty_params() {
        let empty = Map::new();
        assert_eq!(
            cache_key("/v2/product/1/", None),
            cache_key("/v2/product/1/", Some(&empty))
        );
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryCache::new();
        cache
            .set("key", json!({"status": 200}), None)
            .await
            .unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some(json!({"status": 200})));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_overwrites_existing_entry() {
        let cache = MemoryCache::new();
        cache.set("key", json!(1), None).await.unwrap();
        cache.set("key", json!(2), None).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_memory_cache_expires_entries() {
        let cache = MemoryCache::new();
        cache
            .set("key", json!("v"), Some(Duration::from_millis(30)))
            .await
            .unwrap();
        assert!(cache.get("key").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_applies_default_ttl() {
        let cache = MemoryCache::with_default_ttl(Duration::from_millis(30));
        cache.set("key", json!("v"), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_delete_and_clear() {
        let cache = MemoryCache::new();
        cache.set("a", json!(1), None).await.unwrap();
        cache.set("b", json!(2), None).await.unwrap();

        cache.delete("a").await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        cache.delete("a").await.unwrap();

        cache.clear().await.unwrap();
        assert_eq!(cache.get("b").await.unwrap(), None);
    }
}
