//! Shared-secret authentication for administrative endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Header carrying the admin key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-Api-Key` does not match the configured admin key.
///
/// # Errors
///
/// Returns `401 Unauthorized` when the header is missing, not valid UTF-8,
/// or holds the wrong key.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls/{token}", get(url_info_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), api_key::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if st.verify_admin_key(key) => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!("Rejected request with invalid API key");
            Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid API key" }),
            ))
        }
        None => Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "X-Api-Key header is missing" }),
        )),
    }
}
