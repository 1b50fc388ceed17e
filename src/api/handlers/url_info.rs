//! Handler for record metadata lookups.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url_info::UrlInfoResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the metadata of a short link.
///
/// # Endpoint
///
/// `GET /api/urls/{token}` (requires `X-Api-Key`)
///
/// # Response
///
/// ```json
/// {
///   "short_token": "Ab3dE9xZ",
///   "original_url": "https://example.com",
///   "click_count": 42,
///   "created_at": "2025-01-01T00:00:00Z",
///   "valid_until": "2025-01-15T00:00:00Z",
///   "expired": false
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if no record holds the token.
pub async fn url_info_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    let record = state.info_service.get_info(&token).await?;

    Ok(Json(record.into()))
}
