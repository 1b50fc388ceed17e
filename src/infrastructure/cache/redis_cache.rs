//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, UrlCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for token lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnection. Every
/// command is bounded by `op_timeout`; a slow Redis reports
/// [`CacheError::Timeout`] instead of stalling the request.
pub struct RedisCache {
    client: ConnectionManager,
    ttl: Duration,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl` - TTL applied to every entry, positive or negative
    /// - `op_timeout` - Deadline of a single command
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl: Duration, op_timeout: Duration) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!(ttl_seconds = ttl.as_secs(), "Connected to Redis");

        Ok(Self {
            client: manager,
            ttl,
            op_timeout,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, token: &str) -> String {
        format!("{}{}", self.key_prefix, token)
    }

    /// Runs a Redis command under the configured deadline.
    async fn bounded<T, F>(&self, command: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, command).await {
            Ok(result) => result.map_err(|e| CacheError::Operation(e.to_string())),
            Err(_) => Err(CacheError::Timeout(self.op_timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl UrlCache for RedisCache {
    async fn get(&self, token: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();

        let value = self.bounded(conn.get::<_, Option<String>>(&key)).await?;
        debug!(token, hit = value.is_some(), "Redis GET");

        Ok(value)
    }

    async fn set(&self, token: &str, value: &str) -> CacheResult<()> {
        let key = self.build_key(token);
        let mut conn = self.client.clone();
        let ttl_seconds = self.ttl.as_secs().max(1);

        self.bounded(conn.set_ex::<_, _, ()>(&key, value, ttl_seconds))
            .await?;
        debug!(token, ttl_seconds, negative = value.is_empty(), "Redis SET");

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}
