//! API route configuration.

use crate::api::handlers::{health_handler, shorten_handler, url_info_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes open to any client.
///
/// - `POST /shorten` - Create or fetch the short token of a URL
/// - `GET  /health`  - Store, cache and click queue status
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
}

/// Routes requiring the admin key (see [`crate::api::middleware::api_key`]).
///
/// - `GET /urls/{token}` - Record metadata
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/urls/{token}", get(url_info_handler))
}
