use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{truncate_key, ResultCache};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cached value is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("timed out connecting to redis after {0:?}")]
    ConnectTimeout(Duration),
}

/// Shared network cache. Values are stored as JSON text with `SETEX`.
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
}

impl RedisCache {
    /// Connects and verifies the server with `PING`.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let mut conn = tokio::time::timeout(
            CONNECT_TIMEOUT,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::ConnectTimeout(CONNECT_TIMEOUT))??;

        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(Self { conn })
    }

    async fn try_get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        raw.map(|s| serde_json::from_str(&s)).transpose().map_err(CacheError::from)
    }

    async fn try_set(&self, key: &str, value: &Value, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let payload = serde_json::to_string(value)?;
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_secs.max(1))
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn try_delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let removed: i64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(removed > 0)
    }

    async fn try_clear(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHDB").query_async::<_, ()>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl ResultCache for RedisCache {
    async fn get(&self, key: &str) -> Option<Value> {
        match self.try_get(key).await {
            Ok(Some(value)) => {
                debug!(key = %truncate_key(key), "Redis cache hit");
                Some(value)
            }
            Ok(None) => {
                debug!(key = %truncate_key(key), "Redis cache miss");
                None
            }
            Err(e) => {
                warn!(key = %truncate_key(key), "Redis cache read failed: {e}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> bool {
        match self.try_set(key, &value, ttl_secs).await {
            Ok(()) => {
                debug!(key = %truncate_key(key), ttl_secs, "Cached value in redis");
                true
            }
            Err(e) => {
                warn!(key = %truncate_key(key), "Redis cache write failed: {e}");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        self.try_delete(key).await.unwrap_or_else(|e| {
            warn!(key = %truncate_key(key), "Redis cache delete failed: {e}");
            false
        })
    }

    async fn clear(&self) -> bool {
        match self.try_clear().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Redis cache flush failed: {e}");
                false
            }
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
