use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{truncate_key, ResultCache};

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-process cache. Expiry is checked against the wall clock at read time;
/// stale entries are evicted by the read that finds them.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    #[cfg(test)]
    async fn insert_entry(&self, key: &str, entry: CacheEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    debug!(key = %truncate_key(key), "Memory cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    debug!(key = %truncate_key(key), "Memory cache miss");
                    return None;
                }
            }
        }

        // Expired: re-check under the write lock, a concurrent set may have refreshed it.
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                debug!(key = %truncate_key(key), "Memory cache entry expired");
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> bool {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        let ttl = Duration::seconds(secs);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, expires_at });
        debug!(key = %truncate_key(key), ttl_secs, "Cached value in memory");
        true
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    async fn clear(&self) -> bool {
        self.entries.write().await.clear();
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
