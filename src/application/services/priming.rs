//! Best-effort cache priming shared by the workflows.

use tracing::{debug, warn};

use crate::infrastructure::cache::UrlCache;

/// Writes `token -> value` to the cache, logging instead of failing.
pub(crate) async fn prime_cache<C>(cache: &C, token: &str, value: &str)
where
    C: UrlCache + ?Sized,
{
    match cache.set(token, value).await {
        Ok(()) => debug!(token, negative = value.is_empty(), "Cache primed"),
        Err(e) => warn!(token, error = %e, "Failed to prime cache"),
    }
}
