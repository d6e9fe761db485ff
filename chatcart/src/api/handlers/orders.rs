//! Order endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::api::extract::AccountScope;
use crate::api::models::orders::{ListOrdersQuery, OrderCreate, OrderResponse, OrderUpdate};
use crate::db::handlers::{Repository, orders::OrderFilter, orders::Orders};
use crate::db::models::orders::{Order, OrderCreateDBRequest, OrderUpdateDBRequest, PENDING_ORDER_STATUS};
use crate::errors::{Error, Result};
use crate::types::{AccountId, OrderId};
use crate::AppState;

async fn find_owned(conn: &mut sqlx::PgConnection, account_id: AccountId, id: OrderId) -> Result<Order> {
    let order = Orders::new(conn).get_by_id(id).await?;
    match order {
        Some(o) if o.account_id == account_id => Ok(o),
        _ => Err(Error::NotFound {
            resource: "Order".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    summary = "List orders",
    responses(
        (status = 200, description = "Orders, newest first", body = Vec<OrderResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    params(ListOrdersQuery),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_orders(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let mut filter = OrderFilter::for_account(account_id);
    if let Some(status) = query.status {
        filter = filter.with_status(status);
    }
    if let Some(limit) = query.limit {
        filter = filter.with_limit(limit.min(1000));
    }

    let orders = Orders::new(&mut conn).list(&filter).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    summary = "Record an order",
    request_body = OrderCreate,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order data"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Json(body): Json<OrderCreate>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    if body.total_amount < Decimal::ZERO {
        return Err(Error::BadRequest {
            message: "total_amount must not be negative".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let request = OrderCreateDBRequest {
        account_id,
        status: body.status.unwrap_or_else(|| PENDING_ORDER_STATUS.to_string()),
        total_amount: body.total_amount,
    };

    let order = Orders::new(&mut conn).create(&request).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    summary = "Get an order",
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Order ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_order(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let order = find_owned(&mut conn, account_id, id).await?;
    Ok(Json(OrderResponse::from(order)))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}",
    tag = "orders",
    summary = "Update an order",
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Invalid order data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Order ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_order(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<OrderId>,
    Json(body): Json<OrderUpdate>,
) -> Result<Json<OrderResponse>> {
    if matches!(body.total_amount, Some(amount) if amount < Decimal::ZERO) {
        return Err(Error::BadRequest {
            message: "total_amount must not be negative".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_owned(&mut conn, account_id, id).await?;

    let request = OrderUpdateDBRequest {
        status: body.status,
        total_amount: body.total_amount,
    };

    let order = Orders::new(&mut conn).update(id, &request).await?;
    Ok(Json(OrderResponse::from(order)))
}
