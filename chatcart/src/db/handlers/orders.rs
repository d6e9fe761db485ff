//! Database repository for commerce orders.

use sqlx::{PgConnection, QueryBuilder};
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::orders::{Order, OrderCreateDBRequest, OrderUpdateDBRequest},
};
use crate::types::{AccountId, OrderId, abbrev_uuid};

/// Filter for listing orders. Always scoped to one account.
#[derive(Debug, Clone)]
pub struct OrderFilter {
    pub account_id: AccountId,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

impl OrderFilter {
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id,
            status: None,
            limit: None,
        }
    }

    pub fn with_status(mut self, status: String) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Orders<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Orders<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Orders<'c> {
    type CreateRequest = OrderCreateDBRequest;
    type UpdateRequest = OrderUpdateDBRequest;
    type Response = Order;
    type Id = OrderId;
    type Filter = OrderFilter;

    #[instrument(skip(self, request), fields(account_id = %abbrev_uuid(&request.account_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (account_id, status, total_amount)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request.account_id)
        .bind(&request.status)
        .bind(request.total_amount)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(order)
    }

    #[instrument(skip(self, filter), fields(account_id = %abbrev_uuid(&filter.account_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new("SELECT * FROM orders WHERE account_id = ");
        query.push_bind(filter.account_id);

        if let Some(ref status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }

        query.push(" ORDER BY created_at DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let orders = query.build_query_as::<Order>().fetch_all(&mut *self.db).await?;

        Ok(orders)
    }

    #[instrument(skip(self), fields(order_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(order_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET
                status = COALESCE($2, status),
                total_amount = COALESCE($3, total_amount),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.status)
        .bind(request.total_amount)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(order)
    }
}
