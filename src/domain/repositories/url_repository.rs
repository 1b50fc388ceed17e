//! Repository trait for URL record persistence.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Durable store capability for URL records.
///
/// The store is the source of truth. Uniqueness of `short_token` and
/// `original_url` is enforced here, never by application-level locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-memory double
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the token or the original URL is
    /// already stored. `details.constraint` names the violated constraint.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its short token, regardless of validity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its original URL, regardless of validity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlRecord>, AppError>;

    /// Bumps `click_count` of a still-valid record and returns its URL.
    ///
    /// Filter and increment happen in one atomic store operation.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if a record with `valid_until` in the future matched
    /// - `Ok(None)` if the token is unknown or expired
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_and_get_if_valid(&self, token: &str) -> Result<Option<String>, AppError>;

    /// Bumps `click_count` of the record with `token`, expired or not.
    ///
    /// Used for clicks on redirects already served from the cache.
    ///
    /// # Returns
    ///
    /// `false` if no record has this token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, token: &str) -> Result<bool, AppError>;

    /// Hard-deletes records whose `valid_until` is older than now minus `grace`.
    ///
    /// Returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_expired(&self, grace: Duration) -> Result<u64, AppError>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
