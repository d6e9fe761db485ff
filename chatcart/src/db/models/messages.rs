//! Database models for messages within a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{ConversationId, MessageId, OrderId, ProductId};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_sender", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Customer,
    Ai,
    Human,
}

/// What kind of content the message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "message_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    ProductRecommendation,
    OrderSummary,
}

/// Structured payloads attached to non-text messages.
///
/// Stored as JSONB but validated against this shape on both read and write, so
/// handlers never deal with an open-ended dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageMetadata {
    /// Products the assistant suggested in this message.
    ProductRecommendation {
        #[schema(value_type = Vec<uuid::Uuid>)]
        product_ids: Vec<ProductId>,
    },
    /// The order a summary message refers to.
    OrderSummary {
        #[schema(value_type = uuid::Uuid)]
        order_id: OrderId,
    },
}

/// Database model for one message in a conversation.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender: MessageSender,
    pub kind: MessageKind,
    pub content: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Decode the metadata column into its validated form. Rows written before
    /// the shape was nailed down decode to `None` rather than failing the read.
    pub fn parsed_metadata(&self) -> Option<MessageMetadata> {
        self.metadata.as_ref().and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Insert request for a message.
#[derive(Debug, Clone)]
pub struct MessageCreateDBRequest {
    pub conversation_id: ConversationId,
    pub sender: MessageSender,
    pub kind: MessageKind,
    pub content: String,
    pub metadata: Option<MessageMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn metadata_round_trips_through_jsonb_value() {
        let meta = MessageMetadata::ProductRecommendation {
            product_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        };
        let value = serde_json::to_value(&meta).unwrap();

        let message = Message {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender: MessageSender::Ai,
            kind: MessageKind::ProductRecommendation,
            content: "You might like these".to_string(),
            metadata: Some(value),
            created_at: Utc::now(),
        };

        assert_eq!(message.parsed_metadata(), Some(meta));
    }

    #[test]
    fn unrecognized_metadata_decodes_to_none() {
        let message = Message {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender: MessageSender::Customer,
            kind: MessageKind::Text,
            content: "hello".to_string(),
            metadata: Some(serde_json::json!({"legacy_field": true})),
            created_at: Utc::now(),
        };

        assert_eq!(message.parsed_metadata(), None);
    }
}
