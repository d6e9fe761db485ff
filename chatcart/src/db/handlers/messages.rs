//! Database repository for messages within a conversation.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::messages::{Message, MessageCreateDBRequest},
};
use crate::types::{ConversationId, abbrev_uuid};

pub struct Messages<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Messages<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append a message to a conversation.
    ///
    /// Does not refresh the parent thread's preview columns; callers pair this
    /// with [`Conversations::touch_last_message`] inside one transaction.
    ///
    /// [`Conversations::touch_last_message`]: crate::db::handlers::conversations::Conversations::touch_last_message
    #[instrument(skip(self, request), fields(conversation_id = %abbrev_uuid(&request.conversation_id)), err)]
    pub async fn create(&mut self, request: &MessageCreateDBRequest) -> Result<Message> {
        let metadata = request
            .metadata
            .as_ref()
            .map(|m| serde_json::to_value(m).unwrap_or(serde_json::Value::Null));

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, sender, kind, content, metadata)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(request.conversation_id)
        .bind(request.sender)
        .bind(request.kind)
        .bind(&request.content)
        .bind(metadata)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(message)
    }

    /// List all messages of a thread, oldest first, the order a chat transcript
    /// renders in.
    #[instrument(skip(self), fields(conversation_id = %abbrev_uuid(&conversation_id)), err)]
    pub async fn list_by_conversation(&mut self, conversation_id: ConversationId) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(messages)
    }
}
