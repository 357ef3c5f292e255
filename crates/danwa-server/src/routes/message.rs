//! Message Routes - The Room's Message List
//!
//! HTTP handlers that delegate to RoomService for business logic.
//! The poster is identified by the `X-Danwa-Client-Id` header.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};

use danwa::{ChatEvent, DomainError};

use crate::models::{CreateMessageRequest, ListMessagesQuery, MessageResponse};
use crate::services::dispatch::dispatch_event;
use crate::AppState;

/// Header carrying the poster's client ID
pub const CLIENT_ID_HEADER: &str = "x-danwa-client-id";

fn client_id_from(headers: &HeaderMap) -> Result<String, (axum::http::StatusCode, String)> {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .ok_or((
            axum::http::StatusCode::BAD_REQUEST,
            format!("Missing {} header", CLIENT_ID_HEADER),
        ))
}

/// Post a message to the room
#[utoipa::path(
    post,
    path = "/danwa/messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 200, description = "Message posted", body = MessageResponse),
        (status = 400, description = "Missing client header or empty text"),
        (status = 404, description = "Client not identified"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Message"
)]
pub async fn create_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<Json<MessageResponse>, (axum::http::StatusCode, String)> {
    let client_id = client_id_from(&headers)?;

    let message = state
        .room_service
        .post(&client_id, &payload.text)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => (
                axum::http::StatusCode::NOT_FOUND,
                "Client not identified".to_string(),
            ),
            DomainError::Validation(_) => (axum::http::StatusCode::BAD_REQUEST, e.to_string()),
            _ => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    dispatch_event(
        &state,
        ChatEvent::MessagePosted {
            message: message.clone(),
        },
    )
    .await;

    Ok(Json(message.into()))
}

/// List messages in insertion order
#[utoipa::path(
    get,
    path = "/danwa/messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Messages in insertion order", body = Vec<MessageResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Message"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<MessageResponse>>, (axum::http::StatusCode, String)> {
    let messages = match query.limit {
        Some(limit) => state.room_service.recent(limit).await,
        None => state.room_service.list().await,
    }
    .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/danwa/messages", get(list_messages).post(create_message))
}
