//! API request/response models for messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::messages::{Message, MessageKind, MessageMetadata, MessageSender};
use crate::types::{ConversationId, MessageId};

/// Request body for appending a message to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageCreate {
    /// Who authored the message
    pub sender: MessageSender,
    /// Content kind (defaults to text)
    pub kind: Option<MessageKind>,
    /// Message text
    #[schema(example = "Do you have this in size M?")]
    pub content: String,
    /// Structured payload for non-text messages
    pub metadata: Option<MessageMetadata>,
}

/// Full message details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Unique identifier for the message
    #[schema(value_type = String, format = "uuid")]
    pub id: MessageId,
    #[schema(value_type = String, format = "uuid")]
    pub conversation_id: ConversationId,
    pub sender: MessageSender,
    pub kind: MessageKind,
    pub content: String,
    /// Structured payload, when the message carries one
    pub metadata: Option<MessageMetadata>,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        let metadata = message.parsed_metadata();
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            sender: message.sender,
            kind: message.kind,
            content: message.content,
            metadata,
            created_at: message.created_at,
        }
    }
}
