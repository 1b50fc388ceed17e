//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::{ORIGINAL_URL_CONSTRAINT, SHORT_TOKEN_CONSTRAINT};

#[derive(Default)]
struct Tables {
    next_id: i64,
    by_token: HashMap<String, UrlRecord>,
    token_by_url: HashMap<String, String>,
}

/// Store double with the same contract as the PostgreSQL schema.
///
/// Enforces both uniqueness constraints, the validity filter on increments
/// and the grace period on deletion. A single lock makes every operation
/// atomic, mirroring the row-level guarantees of the real store.
#[derive(Default)]
pub struct MemoryUrlRepository {
    tables: RwLock<Tables>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_token.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn save(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut tables = self.tables.write().await;

        let violated = if tables.by_token.contains_key(&record.short_token) {
            Some(SHORT_TOKEN_CONSTRAINT)
        } else if tables.token_by_url.contains_key(&record.original_url) {
            Some(ORIGINAL_URL_CONSTRAINT)
        } else {
            None
        };

        if let Some(constraint) = violated {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            ));
        }

        tables.next_id += 1;
        let saved = UrlRecord {
            id: tables.next_id,
            original_url: record.original_url,
            short_token: record.short_token,
            click_count: 0,
            created_at: record.created_at,
            valid_until: record.valid_until,
        };

        tables
            .token_by_url
            .insert(saved.original_url.clone(), saved.short_token.clone());
        tables
            .by_token
            .insert(saved.short_token.clone(), saved.clone());

        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.tables.read().await.by_token.get(token).cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .token_by_url
            .get(original_url)
            .and_then(|token| tables.by_token.get(token))
            .cloned())
    }

    async fn increment_and_get_if_valid(&self, token: &str) -> Result<Option<String>, AppError> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        Ok(tables
            .by_token
            .get_mut(token)
            .filter(|record| record.valid_until > now)
            .map(|record| {
                record.click_count += 1;
                record.original_url.clone()
            }))
    }

    async fn increment_clicks(&self, token: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        Ok(tables
            .by_token
            .get_mut(token)
            .map(|record| record.click_count += 1)
            .is_some())
    }

    async fn delete_expired(&self, grace: Duration) -> Result<u64, AppError> {
        let out_of_range =
            || AppError::internal("Grace period out of range", json!({ "seconds": grace.as_secs() }));
        let cutoff = TimeDelta::from_std(grace)
            .ok()
            .and_then(|grace| Utc::now().checked_sub_signed(grace))
            .ok_or_else(out_of_range)?;

        let mut tables = self.tables.write().await;
        let Tables {
            by_token,
            token_by_url,
            ..
        } = &mut *tables;

        let before = by_token.len();
        by_token.retain(|_, record| {
            let keep = record.valid_until >= cutoff;
            if !keep {
                token_by_url.remove(&record.original_url);
            }
            keep
        });

        Ok((before - by_token.len()) as u64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
