//! OpenAPI documentation configuration for the `/api/v1` surface.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api::{handlers, models};
use crate::dashboard;
use crate::db::models::conversations::ConversationStatus;
use crate::db::models::messages::{MessageKind, MessageMetadata, MessageSender};
use crate::db::models::settings::CustomResponse;

/// Security scheme: the account header set by the fronting proxy.
struct AccountHeaderAddon;

impl Modify for AccountHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "X-Account-Id".to_string(),
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "X-Account-Id",
                    "Account UUID, set by the authenticating proxy in front of this service.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::dashboard::get_dashboard_metrics,
        handlers::dashboard::get_recent_activity,
        handlers::conversations::list_conversations,
        handlers::conversations::create_conversation,
        handlers::conversations::get_conversation,
        handlers::conversations::update_conversation,
        handlers::conversations::delete_conversation,
        handlers::conversations::list_messages,
        handlers::conversations::create_message,
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::settings::get_assistant_settings,
        handlers::settings::put_assistant_settings,
    ),
    components(schemas(
        dashboard::DashboardMetrics,
        dashboard::ActivityEntry,
        dashboard::ActivityKind,
        models::conversations::ConversationCreate,
        models::conversations::ConversationUpdate,
        models::conversations::ConversationResponse,
        models::messages::MessageCreate,
        models::messages::MessageResponse,
        models::orders::OrderCreate,
        models::orders::OrderUpdate,
        models::orders::OrderResponse,
        models::products::ProductCreate,
        models::products::ProductUpdate,
        models::products::ProductResponse,
        models::settings::AssistantSettingsUpdate,
        models::settings::AssistantSettingsResponse,
        ConversationStatus,
        MessageSender,
        MessageKind,
        MessageMetadata,
        CustomResponse,
    )),
    modifiers(&AccountHeaderAddon),
    tags(
        (name = "dashboard", description = "KPI metrics and recent activity"),
        (name = "conversations", description = "Customer conversation threads"),
        (name = "messages", description = "Messages within a thread"),
        (name = "orders", description = "Commerce orders"),
        (name = "products", description = "Product catalog"),
        (name = "settings", description = "Assistant configuration"),
    ),
    info(
        title = "chatcart API",
        description = "Backend for the WhatsApp commerce dashboard: conversation threads, orders, \
            catalog, assistant settings, and the aggregated dashboard views."
    ),
    servers((url = "/api/v1"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_builds_and_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.contains(&"/dashboard/metrics".to_string()));
        assert!(paths.contains(&"/dashboard/activity".to_string()));
        assert!(paths.contains(&"/conversations".to_string()));
        assert!(paths.contains(&"/conversations/{id}/messages".to_string()));
        assert!(paths.contains(&"/orders".to_string()));
        assert!(paths.contains(&"/products".to_string()));
        assert!(paths.contains(&"/settings/assistant".to_string()));
    }
}
