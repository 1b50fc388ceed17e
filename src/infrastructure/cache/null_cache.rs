//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, UrlCache};
use async_trait::async_trait;
use tracing::debug;

/// A cache that stores nothing and always misses.
///
/// Used when Redis is not configured or unreachable at startup. Every
/// resolution then goes to the durable store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
