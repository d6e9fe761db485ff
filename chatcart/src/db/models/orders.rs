//! Database models for commerce orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::types::{AccountId, OrderId};

/// Order statuses that count toward revenue.
///
/// Status is free-form text because upstream commerce integrations report their
/// own vocabularies; anything outside this set is simply not revenue.
pub const COMPLETED_ORDER_STATUSES: &[&str] = &["completed", "delivered"];

/// The status value that marks an order as awaiting fulfilment.
pub const PENDING_ORDER_STATUS: &str = "pending";

/// Database model for one commerce transaction.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub account_id: AccountId,
    pub status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Whether this order's amount counts toward total revenue.
    pub fn is_completed(&self) -> bool {
        COMPLETED_ORDER_STATUSES.contains(&self.status.as_str())
    }

    /// Whether this order is awaiting fulfilment.
    pub fn is_pending(&self) -> bool {
        self.status == PENDING_ORDER_STATUS
    }
}

/// Insert request for an order.
#[derive(Debug, Clone)]
pub struct OrderCreateDBRequest {
    pub account_id: AccountId,
    pub status: String,
    pub total_amount: Decimal,
}

/// Partial update request for an order. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdateDBRequest {
    pub status: Option<String>,
    pub total_amount: Option<Decimal>,
}
