//! Database models for catalog products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::types::{AccountId, ProductId};

/// Database model for one catalog item.
///
/// `account_id` is nullable: the catalog was historically shared across all
/// accounts, and rows created before per-account scoping carry no owner.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub account_id: Option<AccountId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert request for a product.
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub account_id: Option<AccountId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Partial update request for a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}
