//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{token}`          - Short link redirect (public)
//! - `POST /api/shorten`      - Shorten a URL (public)
//! - `GET  /api/health`       - Health check (public)
//! - `GET  /api/urls/{token}` - Record metadata (`X-Api-Key` required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Every request is bounded by the configured deadline
//! - **Authentication** - Admin key on metadata routes
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{api_key, tracing as request_tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Builds the router with all routes and middleware, without path normalization.
///
/// Requests exceeding `request_timeout` are answered with `408 Request Timeout`.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let protected = api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        api_key::layer,
    ));

    let api_router = api::routes::public_routes().merge(protected);

    Router::new()
        .route("/{token}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(request_tracing::layer())
}

/// Constructs the application service served by [`crate::server::run`].
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, request_timeout))
}
