//! Caching layer for fast redirect lookups.
//!
//! Provides a [`UrlCache`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process cache with TTL for tests and local runs
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, NEGATIVE_ENTRY, UrlCache};

#[cfg(test)]
pub use service::MockUrlCache;
