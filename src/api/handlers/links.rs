//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "custom_code": "promo"   // optional, 1-8 letters/digits
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link and its `short_url`.
///
/// # Errors
///
/// - 400 if the body is not valid JSON for this shape, or the URL or custom
///   code is malformed
/// - 409 if the custom code is already taken
/// - 503 if no free generated code was found; the request may be retried
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.target_url, payload.custom_code)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, short_url)),
    ))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /links?search=term`
///
/// `search` filters by case-insensitive substring over code and target URL.
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let Query(query) = query?;
    let links = state.link_service.list_links(query.search).await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns a single link with its click counters.
///
/// # Endpoint
///
/// `GET /links/{code}`
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Deletes a link. The code can be reused immediately.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse {
        deleted: true,
        code,
    }))
}

/// Counts one click without redirecting (analytics pingback).
///
/// # Endpoint
///
/// `POST /links/{code}/clicks`
///
/// Uses the same atomic increment as the redirect path.
pub async fn register_click_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.register_click(&code).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}
