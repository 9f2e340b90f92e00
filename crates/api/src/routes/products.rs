//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// ```text
/// GET  /products       -> list (public)
/// POST /products       -> create (admin)
/// PUT  /products/{id}  -> update (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/{id}", put(products::update))
}
