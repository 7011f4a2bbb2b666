//! Route definitions for proxy clients.

use axum::routing::get;
use axum::Router;

use crate::handlers::proxy_client;
use crate::state::AppState;

/// Collection routes mounted at `/proxy-clients`.
///
/// ```text
/// GET  /   -> list (query: id, title, os)
/// POST /   -> create
/// ```
pub fn collection_router() -> Router<AppState> {
    Router::new().route("/", get(proxy_client::list).post(proxy_client::create))
}

/// Single-record routes mounted at `/clients`.
///
/// ```text
/// GET    /{id} -> get_by_id
/// PATCH  /{id} -> update
/// DELETE /{id} -> delete
/// ```
pub fn item_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(proxy_client::get_by_id)
            .patch(proxy_client::update)
            .delete(proxy_client::delete),
    )
}
