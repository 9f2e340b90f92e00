pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree, mounted at the root.
///
/// ```text
/// /register            POST  register (public)
/// /token               POST  login (public)
///
/// /products            GET   list active products (public)
/// /products            POST  create product (admin)
/// /products/{id}       PUT   update product (admin)
///
/// /orders              POST  place order (requires auth)
/// /orders              GET   caller's orders (requires auth)
/// /orders/{id}         GET   order by id (owner or admin)
///
/// /webhooks/payment    POST  payment webhook stub (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(webhooks::router())
}
