//! Read-only record metadata lookup.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Service exposing URL record metadata.
///
/// Always reads from the store; metadata is never cached. Expired records
/// that the sweeper has not removed yet are still reported.
pub struct InfoService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> InfoService<R> {
    /// Creates a new info service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves the record behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `token` is empty.
    /// Returns [`AppError::NotFound`] if no record holds the token.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_info(&self, token: &str) -> Result<UrlRecord, AppError> {
        if token.is_empty() {
            return Err(AppError::bad_request(
                "Short token must not be empty",
                json!({ "field": "short_token" }),
            ));
        }

        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "short_token": token })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::{TimeDelta, Utc};

    #[tokio::test]
    async fn test_get_info_returns_record() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_token()
            .withf(|token| token == "abcd1234")
            .times(1)
            .returning(|token| {
                Ok(Some(UrlRecord {
                    id: 3,
                    original_url: "https://example.com".to_string(),
                    short_token: token.to_string(),
                    click_count: 5,
                    created_at: Utc::now(),
                    valid_until: Utc::now() + TimeDelta::days(14),
                }))
            });

        let record = InfoService::new(Arc::new(repo))
            .get_info("abcd1234")
            .await
            .unwrap();

        assert_eq!(record.click_count, 5);
        assert_eq!(record.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_get_info_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_token().times(1).returning(|_| Ok(None));

        let result = InfoService::new(Arc::new(repo)).get_info("missing0").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_info_rejects_empty_token() {
        let result = InfoService::new(Arc::new(MockUrlRepository::new()))
            .get_info("")
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
