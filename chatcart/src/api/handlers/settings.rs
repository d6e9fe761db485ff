//! Assistant settings endpoints.

use axum::{Json, extract::State};

use crate::api::extract::AccountScope;
use crate::api::models::settings::{AssistantSettingsResponse, AssistantSettingsUpdate};
use crate::db::handlers::settings::Settings;
use crate::db::models::settings::AssistantSettingsUpsertDBRequest;
use crate::errors::{Error, Result};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/settings/assistant",
    tag = "settings",
    summary = "Get assistant settings",
    description = "Returns the saved configuration, or the defaults if the account has never saved \
        the settings form.",
    responses(
        (status = 200, description = "Assistant settings", body = AssistantSettingsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_assistant_settings(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
) -> Result<Json<AssistantSettingsResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let settings = Settings::new(&mut conn).get(account_id).await?;
    let response = settings.map(AssistantSettingsResponse::from).unwrap_or_else(AssistantSettingsResponse::defaults);
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/settings/assistant",
    tag = "settings",
    summary = "Save assistant settings",
    description = "Whole-record write: the settings screen always submits the full form.",
    request_body = AssistantSettingsUpdate,
    responses(
        (status = 200, description = "Saved settings", body = AssistantSettingsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn put_assistant_settings(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Json(body): Json<AssistantSettingsUpdate>,
) -> Result<Json<AssistantSettingsResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let request = AssistantSettingsUpsertDBRequest {
        account_id,
        assistant_name: body.assistant_name,
        tone_of_voice: body.tone_of_voice,
        language: body.language,
        auto_respond: body.auto_respond,
        product_recommendations: body.product_recommendations,
        order_processing: body.order_processing,
        welcome_message: body.welcome_message,
        away_message: body.away_message,
        custom_responses: body.custom_responses,
    };

    let settings = Settings::new(&mut conn).upsert(&request).await?;
    Ok(Json(AssistantSettingsResponse::from(settings)))
}
