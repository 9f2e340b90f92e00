//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod orders;
pub mod products;
pub mod webhooks;
