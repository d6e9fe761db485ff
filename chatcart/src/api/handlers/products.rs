//! Product catalog endpoints.
//!
//! Catalog visibility depends on the `scope_products_to_account` config flag:
//! shared mode (the default) serves every row to every account, scoped mode
//! restricts reads and writes to rows the requesting account owns.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::api::extract::AccountScope;
use crate::api::models::products::{ProductCreate, ProductResponse, ProductUpdate};
use crate::db::handlers::{Repository, products::ProductFilter, products::Products};
use crate::db::models::products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{AccountId, ProductId};
use crate::AppState;

/// Look up a product and confirm the requesting account may act on it under the
/// current scoping mode.
async fn find_visible(state: &AppState, conn: &mut sqlx::PgConnection, account_id: AccountId, id: ProductId) -> Result<Product> {
    let product = Products::new(conn).get_by_id(id).await?;
    let visible = match &product {
        Some(p) if state.config.scope_products_to_account => p.account_id == Some(account_id),
        Some(_) => true,
        None => false,
    };

    match (product, visible) {
        (Some(p), true) => Ok(p),
        _ => Err(Error::NotFound {
            resource: "Product".to_string(),
            id: id.to_string(),
        }),
    }
}

fn validate_product_numbers(price: Option<Decimal>, stock_quantity: Option<i32>) -> Result<()> {
    if matches!(price, Some(p) if p < Decimal::ZERO) {
        return Err(Error::BadRequest {
            message: "price must not be negative".to_string(),
        });
    }
    if matches!(stock_quantity, Some(q) if q < 0) {
        return Err(Error::BadRequest {
            message: "stock_quantity must not be negative".to_string(),
        });
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    summary = "List products",
    responses(
        (status = 200, description = "Catalog products, newest first", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>, AccountScope(account_id): AccountScope) -> Result<Json<Vec<ProductResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = if state.config.scope_products_to_account {
        ProductFilter::for_account(account_id)
    } else {
        ProductFilter::shared_catalog()
    };

    let products = Products::new(&mut conn).list(&filter).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    summary = "Add a product",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Json(body): Json<ProductCreate>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    if body.name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "name must not be empty".to_string(),
        });
    }
    validate_product_numbers(Some(body.price), Some(body.stock_quantity))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // New rows always record their creator, even in shared mode, so the catalog
    // can be scoped later without another backfill.
    let request = ProductCreateDBRequest {
        account_id: Some(account_id),
        name: body.name,
        description: body.description,
        price: body.price,
        stock_quantity: body.stock_quantity,
    };

    let product = Products::new(&mut conn).create(&request).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

#[utoipa::path(
    patch,
    path = "/products/{id}",
    tag = "products",
    summary = "Update a product",
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>> {
    validate_product_numbers(body.price, body.stock_quantity)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_visible(&state, &mut conn, account_id, id).await?;

    let request = ProductUpdateDBRequest {
        name: body.name,
        description: body.description,
        price: body.price,
        stock_quantity: body.stock_quantity,
    };

    let product = Products::new(&mut conn).update(id, &request).await?;
    Ok(Json(ProductResponse::from(product)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    summary = "Remove a product",
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_product(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_visible(&state, &mut conn, account_id, id).await?;

    Products::new(&mut conn).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
