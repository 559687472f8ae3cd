//! Link management route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    register_click_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST   /links`               - Create a short link
/// - `GET    /links`               - List links (`?search=` filter)
/// - `GET    /links/{code}`        - Link detail with click counters
/// - `DELETE /links/{code}`        - Delete a link
/// - `POST   /links/{code}/clicks` - Count a click without redirecting
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{code}/clicks", post(register_click_handler))
}
