//! URL record entity: the only persistent entity of the service.

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use std::time::Duration;

use crate::error::AppError;
use crate::utils::token_generator::{TOKEN_LENGTH, generate_token};

/// Validity window stamped on new records unless configured otherwise.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// A persisted mapping from a short token to its original URL.
///
/// `original_url`, `short_token`, `created_at` and `valid_until` never change
/// after creation. `click_count` is only ever bumped atomically by the store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_token: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl UrlRecord {
    /// Returns true once `valid_until` has passed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until <= now
    }
}

/// Input data for persisting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_token: String,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl NewUrlRecord {
    /// Builds a record for `original_url` with a fresh token, stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is empty, and
    /// [`AppError::Internal`] if `validity_window` does not fit a timestamp.
    pub fn generate(original_url: &str, validity_window: Duration) -> Result<Self, AppError> {
        if original_url.is_empty() {
            return Err(AppError::bad_request(
                "Original URL must not be empty",
                json!({ "field": "original_url" }),
            ));
        }

        let window = TimeDelta::from_std(validity_window).map_err(|_| {
            AppError::internal(
                "Validity window out of range",
                json!({ "seconds": validity_window.as_secs() }),
            )
        })?;

        let created_at = Utc::now();
        let valid_until = created_at.checked_add_signed(window).ok_or_else(|| {
            AppError::internal(
                "Validity window out of range",
                json!({ "seconds": validity_window.as_secs() }),
            )
        })?;

        Ok(Self {
            original_url: original_url.to_string(),
            short_token: generate_token(TOKEN_LENGTH),
            created_at,
            valid_until,
        })
    }
}
