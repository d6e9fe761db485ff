//! API request/response models for conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::db::models::conversations::{Conversation, ConversationStatus};
use crate::types::ConversationId;

/// Query parameters for listing conversations
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListConversationsQuery {
    /// Restrict to threads in this status
    pub status: Option<ConversationStatus>,
    /// Maximum number of conversations to return
    pub limit: Option<i64>,
}

/// Request body for opening a new conversation thread.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationCreate {
    /// Customer's WhatsApp phone number
    #[schema(example = "+4915112345678")]
    pub customer_phone: String,
    /// Customer's display name, if known
    #[schema(example = "Maria Santos")]
    pub customer_name: Option<String>,
    /// Initial thread status (defaults to active)
    pub status: Option<ConversationStatus>,
}

/// Request body for updating a conversation. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationUpdate {
    /// New customer display name (null to keep unchanged)
    pub customer_name: Option<String>,
    /// New thread status (null to keep unchanged)
    pub status: Option<ConversationStatus>,
}

/// Full conversation details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationResponse {
    /// Unique identifier for the conversation
    #[schema(value_type = String, format = "uuid")]
    pub id: ConversationId,
    pub customer_phone: String,
    pub customer_name: Option<String>,
    pub status: ConversationStatus,
    /// Preview of the most recent message in the thread
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id,
            customer_phone: conversation.customer_phone,
            customer_name: conversation.customer_name,
            status: conversation.status,
            last_message: conversation.last_message,
            last_message_at: conversation.last_message_at,
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}
