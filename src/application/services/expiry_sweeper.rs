//! Deletion of long-expired URL records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::scheduler::ScheduledTask;

/// Hard-deletes records expired for longer than the grace period.
///
/// Idempotent: a run with nothing to delete succeeds with zero. Failures go
/// back to the caller once; retry cadence belongs to whoever triggers it.
pub struct ExpirySweeper<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    grace: Duration,
}

impl<R: UrlRepository + ?Sized> ExpirySweeper<R> {
    pub fn new(repository: Arc<R>, grace: Duration) -> Self {
        Self { repository, grace }
    }

    /// Runs one sweep and returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn execute(&self) -> Result<u64, AppError> {
        let deleted = self.repository.delete_expired(self.grace).await?;

        if deleted > 0 {
            info!(deleted, grace_seconds = self.grace.as_secs(), "Expired URLs removed");
        } else {
            debug!("No expired URLs to remove");
        }

        Ok(deleted)
    }
}

#[async_trait]
impl<R: UrlRepository + ?Sized> ScheduledTask for ExpirySweeper<R> {
    fn name(&self) -> &'static str {
        "cleanup_expired_urls"
    }

    async fn run(&self) -> Result<(), AppError> {
        self.execute().await.map(|_| ())
    }
}
