//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL records.
///
/// Both uniqueness constraints (`urls_short_token_key`, `urls_original_url_key`)
/// live in the schema; see `migrations/`.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn save(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let saved = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (original_url, short_token, click_count, created_at, valid_until)
            VALUES ($1, $2, 0, $3, $4)
            RETURNING id, original_url, short_token, click_count, created_at, valid_until
            "#,
        )
        .bind(&record.original_url)
        .bind(&record.short_token)
        .bind(record.created_at)
        .bind(record.valid_until)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_token, click_count, created_at, valid_until
            FROM urls
            WHERE short_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_token, click_count, created_at, valid_until
            FROM urls
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn increment_and_get_if_valid(&self, token: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE urls
            SET click_count = click_count + 1
            WHERE short_token = $1
              AND valid_until > NOW()
            RETURNING original_url
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn increment_clicks(&self, token: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET click_count = click_count + 1
            WHERE short_token = $1
            "#,
        )
        .bind(token)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, grace: Duration) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM urls
            WHERE valid_until < NOW() - make_interval(secs => $1)
            "#,
        )
        .bind(grace.as_secs_f64())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
