//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// ```text
/// POST /orders       -> place order (requires auth)
/// GET  /orders       -> caller's orders (requires auth)
/// GET  /orders/{id}  -> order by id (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list_own).post(orders::create))
        .route("/orders/{id}", get(orders::get_by_id))
}
