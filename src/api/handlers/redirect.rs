//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Headers that keep browsers and proxies from caching the redirect, so every
/// visit reaches the service and is counted.
const NO_CACHE_HEADERS: [(header::HeaderName, &str); 3] = [
    (
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, max-age=0",
    ),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Atomically increment the click counter and stamp `last_clicked_at`
/// 2. Return `302 Found` with the target in `Location` and no-cache headers
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target_url = state.link_service.resolve_redirect(&code).await?;

    redirect_response(&target_url)
}

fn redirect_response(target_url: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(target_url).map_err(|_| {
        tracing::error!(target_url, "Stored target URL is not a valid header value");
        AppError::internal("Stored target URL is invalid", serde_json::json!({}))
    })?;

    let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();

    let headers = response.headers_mut();
    for (name, value) in NO_CACHE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    Ok(response)
}
