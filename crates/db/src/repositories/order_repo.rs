//! Repository for the `orders` and `order_items` tables.
//!
//! Order placement is the one multi-entity write in the system and runs
//! entirely inside a single transaction with row-level locks, so stock can
//! never be overdrawn by concurrent requests.

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::pricing;
use storefront_core::types::DbId;

use crate::models::order::{Order, OrderItem, OrderLine, OrderWithItems};
use crate::models::product::Product;

/// Column list for the `orders` table.
const ORDER_COLUMNS: &str = "id, user_id, total_amount, status, created_at, updated_at";

/// Column list for the `order_items` table.
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price, total_price";

/// Column list for the locked product read inside [`OrderRepo::place`].
const PRODUCT_COLUMNS: &str =
    "id, name, description, price, stock_quantity, is_active, created_at, updated_at";

/// Failure modes of order placement.
///
/// `ProductNotFound` and `InsufficientStock` are raised before any write
/// for the offending line; either way the enclosing transaction is dropped
/// uncommitted, so no partial state is ever visible.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    /// The referenced product does not exist or is inactive.
    #[error("Product with id {0} not found")]
    ProductNotFound(DbId),

    /// The product exists but cannot cover the requested quantity.
    #[error("Insufficient stock for product {name}: requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: i32,
        available: i32,
    },

    /// Any underlying database failure.
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides order placement and order queries.
pub struct OrderRepo;

impl OrderRepo {
    /// Place an order: check stock, snapshot prices, decrement stock, and
    /// persist the order with its items -- all in one transaction.
    ///
    /// Product rows are locked with `SELECT ... FOR UPDATE` in ascending
    /// product-id order (concurrent multi-line orders cannot deadlock), so
    /// the check-then-decrement sequence is serialized per product. A line
    /// referencing an already-locked product re-reads the row inside the
    /// same transaction and therefore sees its own earlier decrement.
    ///
    /// Any error before the final commit drops the transaction and rolls
    /// every write back.
    ///
    /// `lines` must be non-empty with positive quantities; the API layer
    /// validates this before calling.
    pub async fn place(
        pool: &PgPool,
        user_id: DbId,
        lines: &[OrderLine],
    ) -> Result<OrderWithItems, PlaceOrderError> {
        let mut tx = pool.begin().await?;

        // Lock order: ascending product id, independent of request order.
        let mut lock_order: Vec<usize> = (0..lines.len()).collect();
        lock_order.sort_by_key(|&i| lines[i].product_id);

        let lock_query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE");
        let mut unit_prices: Vec<Decimal> = vec![Decimal::ZERO; lines.len()];

        for &i in &lock_order {
            let line = &lines[i];

            let product = sqlx::query_as::<_, Product>(&lock_query)
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?
                .filter(|p| p.is_active)
                .ok_or(PlaceOrderError::ProductNotFound(line.product_id))?;

            if product.stock_quantity < line.quantity {
                return Err(PlaceOrderError::InsufficientStock {
                    name: product.name,
                    requested: line.quantity,
                    available: product.stock_quantity,
                });
            }

            sqlx::query(
                "UPDATE products
                 SET stock_quantity = stock_quantity - $2, updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            unit_prices[i] = product.price;
        }

        // Totals in the caller's line order, from the snapshotted prices.
        let line_totals: Vec<Decimal> = lines
            .iter()
            .zip(&unit_prices)
            .map(|(line, &price)| pricing::line_total(price, line.quantity))
            .collect();
        let total_amount = pricing::order_total(line_totals.iter().copied());

        let insert_order = format!(
            "INSERT INTO orders (user_id, total_amount)
             VALUES ($1, $2)
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&insert_order)
            .bind(user_id)
            .bind(total_amount)
            .fetch_one(&mut *tx)
            .await?;

        let insert_item = format!(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(order.id)
                .bind(line.product_id)
                .bind(line.quantity)
                .bind(unit_prices[i])
                .bind(line_totals[i])
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        tx.commit().await?;
        Ok(OrderWithItems { order, items })
    }

    /// Find an order by internal ID, without items.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an order by ID, enriched with its items.
    pub async fn find_by_id_with_items(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(order) => {
                let items = Self::items_for_order(pool, order.id).await?;
                Ok(Some(OrderWithItems { order, items }))
            }
            None => Ok(None),
        }
    }

    /// List a user's orders, newest first, each with its items.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = Self::items_for_order(pool, order.id).await?;
            result.push(OrderWithItems { order, items });
        }
        Ok(result)
    }

    /// All items belonging to one order, in insertion order.
    async fn items_for_order(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }
}
