//! Database repository for the product catalog.

use sqlx::{PgConnection, QueryBuilder};
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::products::{Product, ProductCreateDBRequest, ProductUpdateDBRequest},
};
use crate::types::{AccountId, ProductId, abbrev_uuid};

/// Filter for listing catalog products.
///
/// `account_id = None` lists the whole shared catalog; `Some` restricts to rows
/// owned by that account. Which mode an endpoint uses is a deployment choice,
/// see the `scope_products_to_account` config flag.
#[derive(Debug, Clone)]
pub struct ProductFilter {
    pub account_id: Option<AccountId>,
    pub limit: Option<i64>,
}

impl ProductFilter {
    pub fn shared_catalog() -> Self {
        Self {
            account_id: None,
            limit: None,
        }
    }

    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Products<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Products<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Products<'c> {
    type CreateRequest = ProductCreateDBRequest;
    type UpdateRequest = ProductUpdateDBRequest;
    type Response = Product;
    type Id = ProductId;
    type Filter = ProductFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (account_id, name, description, price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.account_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.stock_quantity)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(product)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new("SELECT * FROM products");

        if let Some(account_id) = filter.account_id {
            query.push(" WHERE account_id = ");
            query.push_bind(account_id);
        }

        query.push(" ORDER BY created_at DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let products = query.build_query_as::<Product>().fetch_all(&mut *self.db).await?;

        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock_quantity = COALESCE($5, stock_quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.stock_quantity)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(product)
    }
}
