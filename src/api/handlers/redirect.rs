//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// Resolution goes through the cache first and falls back to the store; every
/// successful resolution counts one click. See
/// [`ResolveService`](crate::application::services::ResolveService).
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown or expired.
/// Returns 500 Internal Server Error if the store fails on a cache miss.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.resolve_service.resolve(&token).await?;

    // `Redirect::permanent` answers 308, clients here expect 301.
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    ))
}
