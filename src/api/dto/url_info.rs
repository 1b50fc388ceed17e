//! DTOs for record metadata lookups.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Metadata of one short link.
#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub short_token: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    /// Set once `valid_until` has passed; the record may linger until swept.
    pub expired: bool,
}

impl From<UrlRecord> for UrlInfoResponse {
    fn from(record: UrlRecord) -> Self {
        let expired = record.is_expired();
        Self {
            short_token: record.short_token,
            original_url: record.original_url,
            click_count: record.click_count,
            created_at: record.created_at,
            valid_until: record.valid_until,
            expired,
        }
    }
}
