//! Database models for per-account assistant settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::AccountId;

/// A canned reply the assistant sends when a customer message matches the
/// trigger phrase. Stored as JSONB but validated against this shape rather than
/// kept as an open dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomResponse {
    pub trigger: String,
    pub response: String,
}

/// Database model for one account's assistant configuration.
#[derive(Debug, Clone, FromRow)]
pub struct AssistantSettings {
    pub account_id: AccountId,
    pub assistant_name: String,
    pub tone_of_voice: String,
    pub language: String,
    pub auto_respond: bool,
    pub product_recommendations: bool,
    pub order_processing: bool,
    pub welcome_message: String,
    pub away_message: String,
    pub custom_responses: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssistantSettings {
    /// Decode the custom responses column. Rows holding malformed data decode to
    /// an empty list rather than failing the read.
    pub fn parsed_custom_responses(&self) -> Vec<CustomResponse> {
        self.custom_responses
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}

/// Upsert request for assistant settings. Applies whole-record: the settings
/// screen always submits the full form.
#[derive(Debug, Clone)]
pub struct AssistantSettingsUpsertDBRequest {
    pub account_id: AccountId,
    pub assistant_name: String,
    pub tone_of_voice: String,
    pub language: String,
    pub auto_respond: bool,
    pub product_recommendations: bool,
    pub order_processing: bool,
    pub welcome_message: String,
    pub away_message: String,
    pub custom_responses: Vec<CustomResponse>,
}
