//! Shared application state injected into every handler.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{InfoService, ResolveService, ShortenService};
use crate::domain::click_recorder::{ClickRecorder, QueuedClickRecorder};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::UrlCache;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn UrlRepository, dyn UrlCache>>,
    pub resolve_service: Arc<ResolveService<dyn UrlRepository, dyn UrlCache>>,
    pub info_service: Arc<InfoService<dyn UrlRepository>>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn UrlCache>,
    /// Present when clicks go through the background worker; reported by health.
    pub click_queue: Option<QueuedClickRecorder>,
    admin_key_digest: [u8; 32],
}

impl AppState {
    /// Wires the workflows over a single store and cache.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn UrlCache>,
        clicks: Arc<dyn ClickRecorder>,
        validity_window: Duration,
        admin_api_key: &str,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(
            repository.clone(),
            cache.clone(),
            validity_window,
        ));
        let resolve_service = Arc::new(ResolveService::new(
            repository.clone(),
            cache.clone(),
            clicks,
        ));
        let info_service = Arc::new(InfoService::new(repository.clone()));

        Self {
            shorten_service,
            resolve_service,
            info_service,
            repository,
            cache,
            click_queue: None,
            admin_key_digest: digest(admin_api_key),
        }
    }

    /// Attaches the click queue so the health endpoint can report on it.
    pub fn with_click_queue(mut self, queue: QueuedClickRecorder) -> Self {
        self.click_queue = Some(queue);
        self
    }

    /// Compares `presented` against the admin key without early exit on mismatch.
    pub fn verify_admin_key(&self, presented: &str) -> bool {
        digest(presented)
            .iter()
            .zip(self.admin_key_digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn digest(key: &str) -> [u8; 32] {
    Sha256::digest(key.as_bytes()).into()
}
