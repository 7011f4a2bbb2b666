pub mod health;
pub mod proxy_client;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /proxy-clients                 list (filtered), create
/// /clients/{id}                  get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/proxy-clients", proxy_client::collection_router())
        .nest("/clients", proxy_client::item_router())
}
