//! Database repository for per-account assistant settings.

use sqlx::PgConnection;
use tracing::instrument;

use crate::db::{
    errors::Result,
    models::settings::{AssistantSettings, AssistantSettingsUpsertDBRequest},
};
use crate::types::{AccountId, abbrev_uuid};

pub struct Settings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Settings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch the settings row for an account, if one has been saved.
    #[instrument(skip(self), fields(account_id = %abbrev_uuid(&account_id)), err)]
    pub async fn get(&mut self, account_id: AccountId) -> Result<Option<AssistantSettings>> {
        let settings = sqlx::query_as::<_, AssistantSettings>("SELECT * FROM assistant_settings WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(settings)
    }

    /// Insert or replace the account's settings. The settings screen submits the
    /// whole form every time, so this is a full-record write.
    #[instrument(skip(self, request), fields(account_id = %abbrev_uuid(&request.account_id)), err)]
    pub async fn upsert(&mut self, request: &AssistantSettingsUpsertDBRequest) -> Result<AssistantSettings> {
        let custom_responses = serde_json::to_value(&request.custom_responses).unwrap_or(serde_json::Value::Null);

        let settings = sqlx::query_as::<_, AssistantSettings>(
            r#"
            INSERT INTO assistant_settings (
                account_id, assistant_name, tone_of_voice, language, auto_respond,
                product_recommendations, order_processing, welcome_message, away_message, custom_responses
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (account_id) DO UPDATE SET
                assistant_name = EXCLUDED.assistant_name,
                tone_of_voice = EXCLUDED.tone_of_voice,
                language = EXCLUDED.language,
                auto_respond = EXCLUDED.auto_respond,
                product_recommendations = EXCLUDED.product_recommendations,
                order_processing = EXCLUDED.order_processing,
                welcome_message = EXCLUDED.welcome_message,
                away_message = EXCLUDED.away_message,
                custom_responses = EXCLUDED.custom_responses,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(request.account_id)
        .bind(&request.assistant_name)
        .bind(&request.tone_of_voice)
        .bind(&request.language)
        .bind(request.auto_respond)
        .bind(request.product_recommendations)
        .bind(request.order_processing)
        .bind(&request.welcome_message)
        .bind(&request.away_message)
        .bind(custom_responses)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(settings)
    }
}
