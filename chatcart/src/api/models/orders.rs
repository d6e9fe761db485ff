//! API request/response models for orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::orders::Order;
use crate::types::OrderId;

/// Query parameters for listing orders
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListOrdersQuery {
    /// Restrict to orders in this status
    pub status: Option<String>,
    /// Maximum number of orders to return
    pub limit: Option<i64>,
}

/// Request body for recording a new order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderCreate {
    /// Order status (defaults to pending)
    #[schema(example = "pending")]
    pub status: Option<String>,
    /// Order total
    #[schema(value_type = String, example = "49.90")]
    pub total_amount: Decimal,
}

/// Request body for updating an order. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderUpdate {
    /// New status (null to keep unchanged)
    pub status: Option<String>,
    /// New total (null to keep unchanged)
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
}

/// Full order details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Unique identifier for the order
    #[schema(value_type = String, format = "uuid")]
    pub id: OrderId,
    pub status: String,
    #[schema(value_type = String, example = "49.90")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total_amount: order.total_amount,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
