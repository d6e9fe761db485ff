//! Database repository for customer conversations.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, QueryBuilder};
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::conversations::{Conversation, ConversationCreateDBRequest, ConversationStatus, ConversationUpdateDBRequest},
};
use crate::types::{AccountId, ConversationId, abbrev_uuid};

/// Filter for listing conversations. Always scoped to one account.
#[derive(Debug, Clone)]
pub struct ConversationFilter {
    pub account_id: AccountId,
    pub status: Option<ConversationStatus>,
    /// `None` fetches the full thread list (the dashboard aggregates over
    /// everything); endpoints serving list screens set a limit.
    pub limit: Option<i64>,
}

impl ConversationFilter {
    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id,
            status: None,
            limit: None,
        }
    }

    pub fn with_status(mut self, status: ConversationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Conversations<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Conversations<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record that a message landed in this thread, refreshing the denormalized
    /// preview columns the dashboard and list screens read.
    #[instrument(skip(self, preview), fields(conversation_id = %abbrev_uuid(&id)), err)]
    pub async fn touch_last_message(&mut self, id: ConversationId, preview: &str, at: DateTime<Utc>) -> Result<Conversation> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            UPDATE conversations
            SET last_message = $2, last_message_at = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(preview)
        .bind(at)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(conversation)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Conversations<'c> {
    type CreateRequest = ConversationCreateDBRequest;
    type UpdateRequest = ConversationUpdateDBRequest;
    type Response = Conversation;
    type Id = ConversationId;
    type Filter = ConversationFilter;

    #[instrument(skip(self, request), fields(account_id = %abbrev_uuid(&request.account_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (account_id, customer_phone, customer_name, status, last_message, last_message_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(request.account_id)
        .bind(&request.customer_phone)
        .bind(&request.customer_name)
        .bind(request.status)
        .bind(&request.last_message)
        .bind(request.last_message_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(conversation)
    }

    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let conversation = sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(conversation)
    }

    #[instrument(skip(self, filter), fields(account_id = %abbrev_uuid(&filter.account_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new("SELECT * FROM conversations WHERE account_id = ");
        query.push_bind(filter.account_id);

        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }

        // Threads with no messages yet sort on creation time.
        query.push(" ORDER BY COALESCE(last_message_at, created_at) DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let conversations = query.build_query_as::<Conversation>().fetch_all(&mut *self.db).await?;

        Ok(conversations)
    }

    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(conversation_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            UPDATE conversations SET
                customer_name = COALESCE($2, customer_name),
                status = COALESCE($3, status),
                last_message = COALESCE($4, last_message),
                last_message_at = COALESCE($5, last_message_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.customer_name)
        .bind(request.status)
        .bind(&request.last_message)
        .bind(request.last_message_at)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(conversation)
    }
}
