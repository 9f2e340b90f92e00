//! Order and order item entity models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// Order lifecycle status, stored as the `order_status` Postgres enum.
///
/// Orders are created as `PendingPayment`; no operation in this service
/// transitions them further (the payment webhook is a stub).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

/// Full order row from the `orders` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    /// Equals the sum of this order's item totals, checked at creation.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full order item row from the `order_items` table.
///
/// `unit_price` is a snapshot of the product price at order time; later
/// product price changes never alter past orders.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// An order joined with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One requested line of a new order: which product and how many.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    pub product_id: DbId,
    pub quantity: i32,
}
