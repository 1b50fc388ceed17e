//! Token resolution workflow for redirects.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use super::priming::prime_cache;
use crate::domain::click_recorder::ClickRecorder;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{NEGATIVE_ENTRY, UrlCache};

/// Resolves short tokens to original URLs with cache-aside reads.
///
/// # Cache Strategy
///
/// - **Positive hit**: return the cached URL, hand the click to the
///   [`ClickRecorder`] and never touch the store on the response path
/// - **Negative hit** (empty value): not found, no store access
/// - **Miss or cache error**: atomic increment-if-valid in the store, then
///   cache the URL, or the negative entry when nothing valid matched
///
/// A token cached as negative keeps resolving as not found until its cache
/// entry expires, even if it becomes valid meanwhile.
pub struct ResolveService<R: UrlRepository + ?Sized, C: UrlCache + ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    clicks: Arc<dyn ClickRecorder>,
}

impl<R: UrlRepository + ?Sized, C: UrlCache + ?Sized> ResolveService<R, C> {
    /// Creates a new resolve service.
    pub fn new(repository: Arc<R>, cache: Arc<C>, clicks: Arc<dyn ClickRecorder>) -> Self {
        Self {
            repository,
            cache,
            clicks,
        }
    }

    /// Resolves `token` and counts the click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `token` is empty (no I/O happens).
    /// Returns [`AppError::NotFound`] if the token is unknown or expired.
    /// Returns [`AppError::Internal`] if the store fails on a cache miss.
    pub async fn resolve(&self, token: &str) -> Result<String, AppError> {
        if token.is_empty() {
            return Err(AppError::bad_request(
                "Short token must not be empty",
                json!({ "field": "short_token" }),
            ));
        }

        match self.cache.get(token).await {
            Ok(Some(cached)) if cached == NEGATIVE_ENTRY => {
                debug!(token, "Cache NEGATIVE HIT");
                return Err(not_found(token));
            }
            Ok(Some(cached)) => {
                debug!(token, "Cache HIT");
                self.clicks.record(token).await;
                return Ok(cached);
            }
            Ok(None) => debug!(token, "Cache MISS"),
            Err(e) => warn!(token, error = %e, "Cache read failed, falling back to store"),
        }

        let resolved = self
            .repository
            .increment_and_get_if_valid(token)
            .await
            .inspect_err(|e| error!(token, error = %e, "Failed to resolve token from store"))?;

        match resolved {
            Some(url) => {
                prime_cache(self.cache.as_ref(), token, &url).await;
                Ok(url)
            }
            None => {
                prime_cache(self.cache.as_ref(), token, NEGATIVE_ENTRY).await;
                Err(not_found(token))
            }
        }
    }
}

fn not_found(token: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "short_token": token }))
}
