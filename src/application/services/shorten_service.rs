//! Short link creation workflow.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, error, warn};

use super::priming::prime_cache;
use crate::domain::entities::NewUrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::UrlCache;

/// Creates short tokens, idempotently per original URL.
///
/// The record is persisted before the cache is primed, so a reader never
/// sees a cached token that the store does not hold.
pub struct ShortenService<R: UrlRepository + ?Sized, C: UrlCache + ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    validity_window: Duration,
}

impl<R: UrlRepository + ?Sized, C: UrlCache + ?Sized> ShortenService<R, C> {
    /// Creates a new shorten service.
    pub fn new(repository: Arc<R>, cache: Arc<C>, validity_window: Duration) -> Self {
        Self {
            repository,
            cache,
            validity_window,
        }
    }

    /// Returns the short token for `original_url`, creating it if needed.
    ///
    /// # Deduplication
    ///
    /// When the store rejects the insert because `original_url` is already
    /// shortened, the existing record's token is returned instead. A conflict
    /// caused by a token collision is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is empty (no I/O happens).
    /// Returns [`AppError::Internal`] on store failures or an unrecoverable token collision.
    pub async fn shorten(&self, original_url: &str) -> Result<String, AppError> {
        let new_record = NewUrlRecord::generate(original_url, self.validity_window)?;
        debug!(token = %new_record.short_token, "Generated short token");

        let record = match self.repository.save(new_record).await {
            Ok(saved) => saved,
            Err(e) if e.is_conflict() => {
                debug!(original_url, "URL already shortened, fetching existing record");

                self.repository
                    .find_by_original_url(original_url)
                    .await?
                    .ok_or_else(|| {
                        warn!(original_url, "Token collision on create");
                        AppError::internal(
                            "Failed to generate unique token",
                            json!({ "reason": "token collision" }),
                        )
                    })?
            }
            Err(e) => {
                error!(original_url, error = %e, "Failed to save URL record");
                return Err(e);
            }
        };

        if record.is_expired() {
            debug!(token = %record.short_token, "Existing record expired, cache not primed");
        } else {
            prime_cache(self.cache.as_ref(), &record.short_token, &record.original_url).await;
        }

        Ok(record.short_token)
    }
}
