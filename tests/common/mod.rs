#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use link_relay::domain::click_recorder::InlineClickRecorder;
use link_relay::domain::entities::{NewUrlRecord, UrlRecord};
use link_relay::domain::repositories::UrlRepository;
use link_relay::error::AppError;
use link_relay::infrastructure::cache::{CacheError, CacheResult, MemoryCache, UrlCache};
use link_relay::infrastructure::persistence::MemoryUrlRepository;
use link_relay::routes::router;
use link_relay::state::AppState;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub const ADMIN_KEY: &str = "test-admin-key";
pub const VALIDITY_WINDOW: Duration = Duration::from_secs(14 * 24 * 60 * 60);
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Repository wrapper counting every call, optionally failing all of them.
#[derive(Default)]
pub struct SpyRepository {
    pub inner: MemoryUrlRepository,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl SpyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::internal("Database error", json!({})))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UrlRepository for SpyRepository {
    async fn save(&self, record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        self.enter()?;
        self.inner.save(record).await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlRecord>, AppError> {
        self.enter()?;
        self.inner.find_by_token(token).await
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        self.enter()?;
        self.inner.find_by_original_url(original_url).await
    }

    async fn increment_and_get_if_valid(&self, token: &str) -> Result<Option<String>, AppError> {
        self.enter()?;
        self.inner.increment_and_get_if_valid(token).await
    }

    async fn increment_clicks(&self, token: &str) -> Result<bool, AppError> {
        self.enter()?;
        self.inner.increment_clicks(token).await
    }

    async fn delete_expired(&self, grace: Duration) -> Result<u64, AppError> {
        self.enter()?;
        self.inner.delete_expired(grace).await
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

/// Cache whose backend is always unreachable.
pub struct BrokenCache;

#[async_trait]
impl UrlCache for BrokenCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Stores a record that expired `ago` in the past.
pub async fn insert_expired<R: UrlRepository + ?Sized>(
    repository: &R,
    original_url: &str,
    token: &str,
    ago: ChronoDuration,
) -> UrlRecord {
    let valid_until = Utc::now() - ago;
    repository
        .save(NewUrlRecord {
            original_url: original_url.to_string(),
            short_token: token.to_string(),
            created_at: valid_until - ChronoDuration::days(14),
            valid_until,
        })
        .await
        .unwrap()
}

/// Stores a record valid for the default window under a fixed token.
pub async fn insert_valid<R: UrlRepository + ?Sized>(
    repository: &R,
    original_url: &str,
    token: &str,
) -> UrlRecord {
    let created_at = Utc::now();
    repository
        .save(NewUrlRecord {
            original_url: original_url.to_string(),
            short_token: token.to_string(),
            created_at,
            valid_until: created_at + ChronoDuration::days(14),
        })
        .await
        .unwrap()
}

pub fn create_test_state(
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn UrlCache>,
) -> AppState {
    let clicks = Arc::new(InlineClickRecorder::new(repository.clone()));
    AppState::new(repository, cache, clicks, VALIDITY_WINDOW, ADMIN_KEY)
}

pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<SpyRepository>,
    pub cache: Arc<MemoryCache>,
}

/// Router over in-memory doubles with inline click recording.
pub fn spawn_app() -> TestApp {
    let repository = Arc::new(SpyRepository::new());
    let cache = Arc::new(MemoryCache::new(CACHE_TTL));
    let state = create_test_state(repository.clone(), cache.clone());

    let server = TestServer::new(router(state, Duration::from_secs(5))).unwrap();

    TestApp {
        server,
        repository,
        cache,
    }
}
