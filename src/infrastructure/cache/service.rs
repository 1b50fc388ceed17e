//! Cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Value stored under a token that is known to have no valid record.
pub const NEGATIVE_ENTRY: &str = "";

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
    #[error("Cache operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value cache with a per-instance TTL.
///
/// The cache is derived data: entries may be stale or missing at any time.
/// Implementations report failures honestly; callers decide whether to
/// absorb them.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlCache: Send + Sync {
    /// Looks up `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` when the key is present, including an empty
    ///   [`NEGATIVE_ENTRY`] value
    /// - `Ok(None)` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot answer.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key` with the instance TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend cannot store the entry.
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
