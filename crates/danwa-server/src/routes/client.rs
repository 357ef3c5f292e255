//! Client Routes - Identity Mapping
//!
//! HTTP handlers for the client-to-name registry.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use danwa::{ChatEvent, DomainError};

use crate::models::{IdentifyRequest, IdentifyResponse, ParticipantResponse, TypingRequest};
use crate::services::dispatch::dispatch_event;
use crate::AppState;

/// Identify a client: bind a display name to its client ID
#[utoipa::path(
    post,
    path = "/danwa/clients/{client_id}/identify",
    params(("client_id" = String, Path, description = "Client ID")),
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Client identified; all known names returned", body = IdentifyResponse),
        (status = 400, description = "Empty name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Client"
)]
pub async fn identify(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<IdentifyRequest>,
) -> Result<Json<IdentifyResponse>, (axum::http::StatusCode, String)> {
    let names = state
        .room_service
        .identify(&client_id, &payload.name)
        .await
        .map_err(|e| match e {
            DomainError::Validation(_) => (axum::http::StatusCode::BAD_REQUEST, e.to_string()),
            _ => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    let name = payload.name.trim().to_string();

    dispatch_event(
        &state,
        ChatEvent::ParticipantIdentified {
            client_id: client_id.clone(),
            name: name.clone(),
            names: names.clone(),
        },
    )
    .await;

    Ok(Json(IdentifyResponse {
        client_id,
        name,
        names,
    }))
}

/// Get the display name for a client
#[utoipa::path(
    get,
    path = "/danwa/clients/{client_id}",
    params(("client_id" = String, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = ParticipantResponse),
        (status = 404, description = "Client not identified"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Client"
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ParticipantResponse>, (axum::http::StatusCode, String)> {
    let participant = state
        .room_service
        .participant(&client_id)
        .await
        .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            axum::http::StatusCode::NOT_FOUND,
            "Client not identified".to_string(),
        ))?;

    Ok(Json(participant.into()))
}

/// List all identified participants
#[utoipa::path(
    get,
    path = "/danwa/clients",
    responses(
        (status = 200, description = "Roster in join order", body = Vec<ParticipantResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Client"
)]
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantResponse>>, (axum::http::StatusCode, String)> {
    let roster = state
        .room_service
        .roster()
        .await
        .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(roster.into_iter().map(Into::into).collect()))
}

/// Broadcast a typing state change for a client
#[utoipa::path(
    post,
    path = "/danwa/clients/{client_id}/typing",
    params(("client_id" = String, Path, description = "Client ID")),
    request_body = TypingRequest,
    responses(
        (status = 200, description = "Typing state broadcast"),
        (status = 404, description = "Client not identified"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Client"
)]
pub async fn typing(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<TypingRequest>,
) -> Result<Json<serde_json::Value>, (axum::http::StatusCode, String)> {
    let name = state
        .room_service
        .client_name(&client_id)
        .await
        .map_err(|e| (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((
            axum::http::StatusCode::NOT_FOUND,
            "Client not identified".to_string(),
        ))?;

    dispatch_event(
        &state,
        ChatEvent::Typing {
            client_id,
            name,
            is_typing: payload.is_typing,
        },
    )
    .await;

    Ok(Json(serde_json::json!({
        "status": "ok"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/danwa/clients", get(list_clients))
        .route("/danwa/clients/:client_id", get(get_client))
        .route("/danwa/clients/:client_id/identify", post(identify))
        .route("/danwa/clients/:client_id/typing", post(typing))
}
