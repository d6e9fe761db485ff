//! API request/response models for assistant settings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::settings::{AssistantSettings, CustomResponse};

/// Request body for saving assistant settings. The settings screen submits
/// the whole form, so every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistantSettingsUpdate {
    #[schema(example = "Sofia")]
    pub assistant_name: String,
    #[schema(example = "friendly")]
    pub tone_of_voice: String,
    #[schema(example = "pt-BR")]
    pub language: String,
    /// Whether the assistant replies to incoming messages automatically
    pub auto_respond: bool,
    /// Whether the assistant may suggest catalog products
    pub product_recommendations: bool,
    /// Whether the assistant may take orders in chat
    pub order_processing: bool,
    pub welcome_message: String,
    pub away_message: String,
    /// Canned replies keyed on trigger phrases
    pub custom_responses: Vec<CustomResponse>,
}

/// Assistant settings returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistantSettingsResponse {
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

impl AssistantSettingsResponse {
    /// Settings shown to accounts that have never saved the form.
    pub fn defaults() -> Self {
        Self {
            assistant_name: "Assistant".to_string(),
            tone_of_voice: "friendly".to_string(),
            language: "en".to_string(),
            auto_respond: true,
            product_recommendations: true,
            order_processing: true,
            welcome_message: "Hi! How can I help you today?".to_string(),
            away_message: "We are currently away. We will get back to you soon.".to_string(),
            custom_responses: Vec::new(),
        }
    }
}

impl From<AssistantSettings> for AssistantSettingsResponse {
    fn from(settings: AssistantSettings) -> Self {
        let custom_responses = settings.parsed_custom_responses();
        Self {
            assistant_name: settings.assistant_name,
            tone_of_voice: settings.tone_of_voice,
            language: settings.language,
            auto_respond: settings.auto_respond,
            product_recommendations: settings.product_recommendations,
            order_processing: settings.order_processing,
            welcome_message: settings.welcome_message,
            away_message: settings.away_message,
            custom_responses,
        }
    }
}
