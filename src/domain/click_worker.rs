//! Background worker applying queued click increments.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Drains `rx` until every sender is dropped, bumping each token's counter.
///
/// Increments are unconditional: a record that expired after its URL was
/// served still gets the click. Failures are logged and the event is dropped;
/// there is no retry.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: UrlRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        match repository.increment_clicks(&event.token).await {
            Ok(true) => debug!(token = %event.token, "Click applied"),
            Ok(false) => debug!(token = %event.token, "Click discarded, record missing"),
            Err(e) => warn!(
                token = %event.token,
                queued_at = %event.occurred_at,
                error = %e,
                "Failed to apply click"
            ),
        }
    }

    info!("Click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_applies_every_event_and_stops() {
        let mut repo = MockUrlRepository::new();
        repo.expect_increment_clicks()
            .times(3)
            .returning(|_| Ok(true));

        let (tx, rx) = mpsc::channel(8);
        for token in ["a", "b", "c"] {
            tx.send(ClickEvent::new(token)).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }

    #[tokio::test]
    async fn test_worker_keeps_going_after_failure() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_increment_clicks()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_increment_clicks()
            .withf(|token| token == "second")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let (tx, rx) = mpsc::channel(8);
        tx.send(ClickEvent::new("first")).await.unwrap();
        tx.send(ClickEvent::new("second")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(repo)).await;
    }
}
