//! Handlers for the `/orders` resource.
//!
//! Order placement delegates the stock check / price snapshot / decrement
//! sequence to `OrderRepo::place`, which runs it in a single locked
//! transaction. The handler only validates the request shape first, so a
//! malformed request never reaches the business logic.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::order::{OrderLine, OrderWithItems};
use storefront_db::models::user::UserRole;
use storefront_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
}

/// POST /orders
///
/// Place an order for the authenticated user. All-or-nothing: any invalid
/// line aborts the whole request with no stock change.
pub async fn create(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderWithItems>> {
    if input.items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Order must contain at least one item".into(),
        )));
    }
    for line in &input.items {
        if line.quantity < 1 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Quantity for product {} must be a positive integer",
                line.product_id
            ))));
        }
    }

    let order = OrderRepo::place(&state.pool, user.id, &input.items).await?;

    tracing::info!(
        order_id = order.order.id,
        user_id = user.id,
        total_amount = %order.order.total_amount,
        "Order placed",
    );
    Ok(Json(order))
}

/// GET /orders
///
/// List the caller's own orders, newest first, each with its items.
pub async fn list_own(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrderWithItems>>> {
    let orders = OrderRepo::list_for_user(&state.pool, user.id).await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
///
/// Fetch one order. Only the owner or an admin may view it; a missing
/// order is reported before the ownership check.
pub async fn get_by_id(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderWithItems>> {
    let order = OrderRepo::find_by_id_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id,
        }))?;

    if order.order.user_id != user.id && user.role != UserRole::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to view this order".into(),
        )));
    }

    Ok(Json(order))
}
