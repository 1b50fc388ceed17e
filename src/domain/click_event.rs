//! Click event model for deferred click counting.

use chrono::{DateTime, Utc};

/// A successful resolution whose click increment has not been applied yet.
///
/// Produced on the cache-hit redirect path and consumed by
/// [`crate::domain::click_worker::run_click_worker`], which decouples the
/// redirect response from the store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub token: String,
    pub occurred_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates an event for `token` stamped with the current time.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            occurred_at: Utc::now(),
        }
    }
}
