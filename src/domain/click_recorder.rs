//! Best-effort click recording used by the redirect fast path.
//!
//! Recording never fails from the caller's point of view: every error is
//! logged and absorbed here.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Sink for click increments whose outcome the caller does not wait on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRecorder: Send + Sync {
    /// Records one click for `token`. Failures are logged, never returned.
    async fn record(&self, token: &str);
}

/// Hands clicks to the background worker through a bounded queue.
///
/// A full or closed queue drops the click.
#[derive(Clone)]
pub struct QueuedClickRecorder {
    sender: mpsc::Sender<ClickEvent>,
}

impl QueuedClickRecorder {
    pub fn new(sender: mpsc::Sender<ClickEvent>) -> Self {
        Self { sender }
    }

    /// Returns true once the worker side of the queue has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

#[async_trait]
impl ClickRecorder for QueuedClickRecorder {
    async fn record(&self, token: &str) {
        match self.sender.try_send(ClickEvent::new(token)) {
            Ok(()) => debug!(token, "Click queued"),
            Err(TrySendError::Full(_)) => warn!(token, "Click queue full, dropping click"),
            Err(TrySendError::Closed(_)) => warn!(token, "Click queue closed, dropping click"),
        }
    }
}

/// Applies the increment directly and swallows its failure.
pub struct InlineClickRecorder<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> InlineClickRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: UrlRepository + ?Sized> ClickRecorder for InlineClickRecorder<R> {
    async fn record(&self, token: &str) {
        match self.repository.increment_clicks(token).await {
            Ok(true) => debug!(token, "Click recorded"),
            Ok(false) => debug!(token, "Click not recorded, record missing"),
            Err(e) => warn!(token, error = %e, "Failed to record click"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_queued_recorder_enqueues_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let recorder = QueuedClickRecorder::new(tx);

        recorder.record("abcd1234").await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.token, "abcd1234");
    }

    #[tokio::test]
    async fn test_queued_recorder_drops_when_full() {
        let (tx, mut rx) = mpsc::channel(1);
        let recorder = QueuedClickRecorder::new(tx);

        recorder.record("first").await;
        recorder.record("second").await;

        assert_eq!(rx.recv().await.unwrap().token, "first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_queued_recorder_survives_closed_queue() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let recorder = QueuedClickRecorder::new(tx);

        assert!(recorder.is_closed());
        recorder.record("abcd1234").await;
    }

    #[tokio::test]
    async fn test_inline_recorder_swallows_store_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .withf(|token| token == "abcd1234")
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let recorder = InlineClickRecorder::new(Arc::new(repo));

        recorder.record("abcd1234").await;
    }
}
