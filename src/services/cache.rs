use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier package cache
///
/// L1 is an in-process moka cache. L2 is Redis, shared across instances,
/// and only present when a Redis URL is configured.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a cache backed by Redis when `redis_url` is given
    pub async fn new(redis_url: Option<&str>, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let redis = match redis_url {
            Some(url) => {
                let client = redis::Client::open(url)?;
                let manager = ConnectionManager::new(client).await?;
                Some(Arc::new(tokio::sync::Mutex::new(manager)))
            }
            None => None,
        };

        Ok(Self {
            redis,
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        })
    }

    /// L1-only cache, used when Redis is not configured or unreachable
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        Self {
            redis: None,
            l1_cache: build_l1(l1_size, ttl_secs),
            ttl_secs,
        }
    }

    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut *conn).await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);
                self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;
                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Store a value in every configured tier
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;
        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Remove a value from every configured tier
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL").arg(key).query_async::<()>(&mut *conn).await?;
        }
        Ok(())
    }
}

fn build_l1(l1_size: u64, ttl_secs: u64) -> moka::future::Cache<String, Vec<u8>> {
    moka::future::CacheBuilder::new(l1_size)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a single package document
    pub fn package(id: &str) -> String {
        format!("package:{}", id)
    }

    /// Key for the full catalog listing
    pub fn package_list() -> String {
        "packages:all".to_string()
    }
}
