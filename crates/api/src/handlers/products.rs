//! Handlers for the `/products` resource.
//!
//! Listing is public; create and update require the admin role.

use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use storefront_core::error::CoreError;
use storefront_core::pagination::{clamp_limit, clamp_offset};
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product, UpdateProduct};
use storefront_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Default page size for `GET /products`.
const DEFAULT_LIMIT: i64 = 100;

/// Hard cap on page size for `GET /products`.
const MAX_LIMIT: i64 = 500;

/// GET /products
///
/// List active products with limit/offset pagination. Public.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Product>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let products = ProductRepo::list_active(&state.pool, limit, offset).await?;
    Ok(Json(products))
}

/// POST /products
///
/// Create a product. Admin only.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<Json<Product>> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if input.price <= Decimal::ZERO {
        return Err(AppError::BadRequest("price must be greater than zero".into()));
    }
    if input.stock_quantity < 0 {
        return Err(AppError::BadRequest(
            "stock_quantity must not be negative".into(),
        ));
    }

    let product = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(
        product_id = product.id,
        user_id = admin.id,
        "Product created",
    );
    Ok(Json(product))
}

/// PUT /products/{id}
///
/// Partial update: only supplied fields overwrite stored values. Admin only.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
    }
    if let Some(price) = input.price {
        if price <= Decimal::ZERO {
            return Err(AppError::BadRequest("price must be greater than zero".into()));
        }
    }
    if let Some(stock) = input.stock_quantity {
        if stock < 0 {
            return Err(AppError::BadRequest(
                "stock_quantity must not be negative".into(),
            ));
        }
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    tracing::info!(
        product_id = product.id,
        user_id = admin.id,
        "Product updated",
    );
    Ok(Json(product))
}
