//! Conversation thread endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::Acquire;

use crate::api::extract::AccountScope;
use crate::api::models::conversations::{ConversationCreate, ConversationResponse, ConversationUpdate, ListConversationsQuery};
use crate::api::models::messages::{MessageCreate, MessageResponse};
use crate::db::handlers::{Repository, conversations::ConversationFilter, conversations::Conversations, messages::Messages};
use crate::db::models::conversations::{Conversation, ConversationCreateDBRequest, ConversationStatus, ConversationUpdateDBRequest};
use crate::db::models::messages::{MessageCreateDBRequest, MessageKind};
use crate::errors::{Error, Result};
use crate::types::{AccountId, ConversationId};
use crate::AppState;

/// Look up a conversation and confirm it belongs to the requesting account.
/// Threads of other accounts are reported as not found, not forbidden.
async fn find_owned(conn: &mut sqlx::PgConnection, account_id: AccountId, id: ConversationId) -> Result<Conversation> {
    let conversation = Conversations::new(conn).get_by_id(id).await?;
    match conversation {
        Some(c) if c.account_id == account_id => Ok(c),
        _ => Err(Error::NotFound {
            resource: "Conversation".to_string(),
            id: id.to_string(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/conversations",
    tag = "conversations",
    summary = "List conversations",
    responses(
        (status = 200, description = "Conversations, most recently active first", body = Vec<ConversationResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    params(ListConversationsQuery),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_conversations(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Query(query): Query<ListConversationsQuery>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let mut filter = ConversationFilter::for_account(account_id);
    if let Some(status) = query.status {
        filter = filter.with_status(status);
    }
    if let Some(limit) = query.limit {
        filter = filter.with_limit(limit.min(1000));
    }

    let conversations = Conversations::new(&mut conn).list(&filter).await?;
    Ok(Json(conversations.into_iter().map(ConversationResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/conversations",
    tag = "conversations",
    summary = "Open a conversation",
    request_body = ConversationCreate,
    responses(
        (status = 201, description = "Conversation created", body = ConversationResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_conversation(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Json(body): Json<ConversationCreate>,
) -> Result<(StatusCode, Json<ConversationResponse>)> {
    if body.customer_phone.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "customer_phone must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let request = ConversationCreateDBRequest {
        account_id,
        customer_phone: body.customer_phone,
        customer_name: body.customer_name,
        status: body.status.unwrap_or(ConversationStatus::Active),
        last_message: None,
        last_message_at: None,
    };

    let conversation = Conversations::new(&mut conn).create(&request).await?;
    Ok((StatusCode::CREATED, Json(ConversationResponse::from(conversation))))
}

#[utoipa::path(
    get,
    path = "/conversations/{id}",
    tag = "conversations",
    summary = "Get a conversation",
    responses(
        (status = 200, description = "Conversation details", body = ConversationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Conversation not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Conversation ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_conversation(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ConversationId>,
) -> Result<Json<ConversationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let conversation = find_owned(&mut conn, account_id, id).await?;
    Ok(Json(ConversationResponse::from(conversation)))
}

#[utoipa::path(
    patch,
    path = "/conversations/{id}",
    tag = "conversations",
    summary = "Update a conversation",
    request_body = ConversationUpdate,
    responses(
        (status = 200, description = "Updated conversation", body = ConversationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Conversation not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Conversation ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_conversation(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ConversationId>,
    Json(body): Json<ConversationUpdate>,
) -> Result<Json<ConversationResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_owned(&mut conn, account_id, id).await?;

    let request = ConversationUpdateDBRequest {
        customer_name: body.customer_name,
        status: body.status,
        ..Default::default()
    };

    let conversation = Conversations::new(&mut conn).update(id, &request).await?;
    Ok(Json(ConversationResponse::from(conversation)))
}

#[utoipa::path(
    delete,
    path = "/conversations/{id}",
    tag = "conversations",
    summary = "Delete a conversation",
    description = "Deletes the thread and, via cascade, all of its messages.",
    responses(
        (status = 204, description = "Conversation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Conversation not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Conversation ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_conversation(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ConversationId>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_owned(&mut conn, account_id, id).await?;

    Conversations::new(&mut conn).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/conversations/{id}/messages",
    tag = "messages",
    summary = "List messages",
    responses(
        (status = 200, description = "Messages, oldest first", body = Vec<MessageResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Conversation not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Conversation ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_messages(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ConversationId>,
) -> Result<Json<Vec<MessageResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    find_owned(&mut conn, account_id, id).await?;

    let messages = Messages::new(&mut conn).list_by_conversation(id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/conversations/{id}/messages",
    tag = "messages",
    summary = "Append a message",
    description = "Appends a message to the thread and refreshes the thread's last-message preview \
        in the same transaction.",
    request_body = MessageCreate,
    responses(
        (status = 201, description = "Message created", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Conversation not found"),
    ),
    params(("id" = uuid::Uuid, Path, description = "Conversation ID")),
    security(("X-Account-Id" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_message(
    State(state): State<AppState>,
    AccountScope(account_id): AccountScope,
    Path(id): Path<ConversationId>,
    Json(body): Json<MessageCreate>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    if body.content.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "content must not be empty".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    find_owned(tx.acquire().await.map_err(|e| Error::Database(e.into()))?, account_id, id).await?;

    let request = MessageCreateDBRequest {
        conversation_id: id,
        sender: body.sender,
        kind: body.kind.unwrap_or(MessageKind::Text),
        content: body.content,
        metadata: body.metadata,
    };

    let message;
    {
        let conn = tx.acquire().await.map_err(|e| Error::Database(e.into()))?;
        message = Messages::new(conn).create(&request).await?;
    }
    {
        let conn = tx.acquire().await.map_err(|e| Error::Database(e.into()))?;
        Conversations::new(conn)
            .touch_last_message(id, &message.content, message.created_at)
            .await?;
    }

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}
