//! API request/response models for catalog products.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::products::Product;
use crate::types::ProductId;

/// Request body for adding a product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    #[schema(example = "Handwoven tote bag")]
    pub name: String,
    pub description: Option<String>,
    /// Unit price
    #[schema(value_type = String, example = "24.90")]
    pub price: Decimal,
    /// Units in stock
    pub stock_quantity: i32,
}

/// Request body for updating a product. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
}

/// Full product details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    /// Unique identifier for the product
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "24.90")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
