//! Database models for customer conversation threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{AccountId, ConversationId};

/// Lifecycle status of a conversation thread.
///
/// `AiHandled` means the assistant fully resolved the exchange without a human
/// stepping in; it feeds the dashboard's AI response rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "conversation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Active,
    Resolved,
    Pending,
    AiHandled,
}

/// Database model for one ongoing customer dialogue thread.
#[derive(Debug, Clone, FromRow)]
pub struct Conversation {
    pub id: ConversationId,
    pub account_id: AccountId,
    pub customer_phone: String,
    pub customer_name: Option<String>,
    pub status: ConversationStatus,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// The label shown for this conversation in activity feeds: the customer's
    /// display name when known, otherwise their phone number.
    pub fn customer_label(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(&self.customer_phone)
    }

    /// The moment this conversation last saw activity, falling back to creation
    /// time for threads that have no messages yet.
    pub fn last_activity_at(&self) -> DateTime<Utc> {
        self.last_message_at.unwrap_or(self.created_at)
    }
}

/// Insert request for a conversation.
#[derive(Debug, Clone)]
pub struct ConversationCreateDBRequest {
    pub account_id: AccountId,
    pub customer_phone: String,
    pub customer_name: Option<String>,
    pub status: ConversationStatus,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

/// Partial update request for a conversation. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ConversationUpdateDBRequest {
    pub customer_name: Option<String>,
    pub status: Option<ConversationStatus>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}
