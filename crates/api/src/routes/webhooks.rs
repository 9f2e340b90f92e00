//! Route definitions for inbound webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// ```text
/// POST /webhooks/payment  -> payment webhook stub
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/webhooks/payment", post(webhooks::payment))
}
