//! Result cache — one interface, two interchangeable backends chosen at startup.
//!
//! Backend failures are logged and reported as a miss (`None`) or `false`;
//! they never reach request handlers as errors.

pub mod memory;
pub mod redis_cache;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;

pub use self::memory::MemoryCache;
pub use self::redis_cache::RedisCache;

#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<Value>;

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> bool;

    async fn delete(&self, key: &str) -> bool;

    async fn clear(&self) -> bool;

    /// Backend label for logs and the service descriptor.
    fn backend(&self) -> &'static str;
}

/// Typed read: a cached value that no longer deserializes counts as a miss
/// and is removed.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ResultCache, key: &str) -> Option<T> {
    let value = cache.get(key).await?;
    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            warn!(key = %truncate_key(key), "Discarding undecodable cache entry: {e}");
            cache.delete(key).await;
            None
        }
    }
}

pub async fn set_json<T: Serialize>(
    cache: &dyn ResultCache,
    key: &str,
    value: &T,
    ttl_secs: u64,
) -> bool {
    match serde_json::to_value(value) {
        Ok(json) => cache.set(key, json, ttl_secs).await,
        Err(e) => {
            warn!(key = %truncate_key(key), "Value could not be serialized for caching: {e}");
            false
        }
    }
}

/// Selects the cache backend: redis when configured and reachable, else in-process.
pub async fn build_cache(config: &Config) -> Arc<dyn ResultCache> {
    let Some(url) = config.redis_url.as_deref() else {
        info!("Using in-memory result cache");
        return Arc::new(MemoryCache::new());
    };

    match RedisCache::connect(url).await {
        Ok(cache) => {
            info!("Redis result cache enabled");
            Arc::new(cache)
        }
        Err(e) => {
            warn!("Redis unavailable, falling back to in-memory cache: {e}");
            Arc::new(MemoryCache::new())
        }
    }
}

/// Keys embed request fingerprints; logs only need the head.
pub(crate) fn truncate_key(key: &str) -> &str {
    match key.char_indices().nth(50) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: u32,
        label: String,
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = MemoryCache::new();
        let payload = Payload {
            id: 7,
            label: "seven".to_string(),
        };
        assert!(set_json(&cache, "typed", &payload, 60).await);
        let back: Option<Payload> = get_json(&cache, "typed").await;
        assert_eq!(back, Some(payload));
    }

    #[tokio::test]
    async fn test_mismatched_shape_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("shape", serde_json::json!([1, 2, 3]), 60).await;
        let back: Option<Payload> = get_json(&cache, "shape").await;
        assert!(back.is_none());
        assert_eq!(cache.get("shape").await, None);
    }

    #[tokio::test]
    async fn test_build_cache_defaults_to_memory() {
        let cache = build_cache(&Config::default()).await;
        assert_eq!(cache.backend(), "memory");
    }

    #[tokio::test]
    async fn test_build_cache_falls_back_when_redis_unreachable() {
        let config = Config {
            redis_url: Some("redis://127.0.0.1:1/".to_string()),
            ..Config::default()
        };
        let cache = build_cache(&config).await;
        assert_eq!(cache.backend(), "memory");
    }

    #[test]
    fn test_truncate_key() {
        let long = "k".repeat(80);
        assert_eq!(truncate_key(&long).len(), 50);
        assert_eq!(truncate_key("short"), "short");
    }
}
