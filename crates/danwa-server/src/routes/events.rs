//! WebSocket Gateway - Realtime Chat Protocol
//!
//! The `/danwa/events` endpoint upgrades an HTTP connection to a
//! WebSocket. Each connection is assigned a generated client ID,
//! announced in a `welcome` frame. After that the connection carries
//! the chat protocol as JSON text frames:
//!
//! - inbound: `join {name}`, `message {text}`, `typing {is_typing}`, `ping`
//! - outbound: every room `ChatEvent` as it is broadcast, plus `pong`
//!   and `error` frames
//!
//! Lagged subscribers (clients too slow to keep up) skip events and
//! catch up with the next ones. Disconnecting removes the client from
//! the roster.

use axum::extract::ws::{Message as WsFrame, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

use danwa::ChatEvent;

use crate::services::dispatch::dispatch_event;
use crate::AppState;

/// Incoming command from a WebSocket client.
///
/// Clients send JSON-encoded text frames matching one of these variants.
/// Unknown or malformed frames get an `error` frame back.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    /// Identify this connection under a display name
    Join { name: String },
    /// Post a message to the room
    Message { text: String },
    /// Announce a typing state change
    Typing { is_typing: bool },
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

/// Upgrade an HTTP request to a WebSocket connection for the chat protocol.
///
/// This is mounted at `/danwa/events` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
///
/// Uses `tokio::select!` to multiplex between room events from the
/// `EventBus` and incoming frames from the client, keeping sender and
/// receiver in a single task.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4().to_string();
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Announce the connection's client ID before anything else
    let welcome = serde_json::json!({ "type": "welcome", "client_id": client_id }).to_string();
    if ws_sender.send(WsFrame::Text(welcome)).await.is_err() {
        return;
    }

    // Subscribe to room events
    let mut event_rx = state.event_bus.subscribe();

    tracing::debug!("WebSocket client {} connected", client_id);

    loop {
        tokio::select! {
            // --- Branch 1: Forward room events to the WebSocket client ---
            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        match serde_json::to_string(&event) {
                            Ok(json) => {
                                if ws_sender.send(WsFrame::Text(json)).await.is_err() {
                                    // Client disconnected
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Failed to serialize ChatEvent: {err}");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            skipped = n,
                            "WebSocket subscriber lagged, skipping {n} events"
                        );
                        // Keep receiving; the client misses some events
                        // but catches up with the next ones.
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        // Bus sender dropped (server shutting down)
                        break;
                    }
                }
            }

            // --- Branch 2: Process frames from the WebSocket client ---
            frame_result = ws_receiver.next() => {
                match frame_result {
                    Some(Ok(WsFrame::Text(text))) => {
                        process_command(&text, &client_id, &state, &mut ws_sender).await;
                    }
                    Some(Ok(WsFrame::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    // Drop the identity mapping for this connection
    if let Err(err) = state.room_service.leave(&client_id).await {
        tracing::warn!("Failed to remove client {}: {}", client_id, err);
    }

    tracing::debug!("WebSocket client {} disconnected", client_id);
}

/// Parse and process a single command frame.
async fn process_command(
    text: &str,
    client_id: &str,
    state: &AppState,
    ws_sender: &mut SplitSink<WebSocket, WsFrame>,
) {
    let cmd: WsCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(raw = %text, error = %err, "Ignoring malformed WebSocket command");
            send_error(ws_sender, "malformed command").await;
            return;
        }
    };

    match cmd {
        WsCommand::Join { name } => match state.room_service.identify(client_id, &name).await {
            Ok(names) => {
                dispatch_event(
                    state,
                    ChatEvent::ParticipantIdentified {
                        client_id: client_id.to_string(),
                        name: name.trim().to_string(),
                        names,
                    },
                )
                .await;
            }
            Err(err) => {
                send_error(ws_sender, &err.to_string()).await;
            }
        },
        WsCommand::Message { text } => match state.room_service.post(client_id, &text).await {
            Ok(message) => {
                dispatch_event(state, ChatEvent::MessagePosted { message }).await;
            }
            Err(err) => {
                send_error(ws_sender, &err.to_string()).await;
            }
        },
        WsCommand::Typing { is_typing } => {
            match state.room_service.client_name(client_id).await {
                Ok(Some(name)) => {
                    dispatch_event(
                        state,
                        ChatEvent::Typing {
                            client_id: client_id.to_string(),
                            name,
                            is_typing,
                        },
                    )
                    .await;
                }
                Ok(None) => {
                    send_error(ws_sender, "join before typing").await;
                }
                Err(err) => {
                    send_error(ws_sender, &err.to_string()).await;
                }
            }
        }
        WsCommand::Ping => {
            let pong = r#"{"type":"pong"}"#;
            if ws_sender.send(WsFrame::Text(pong.to_string())).await.is_err() {
                tracing::debug!("Failed to send pong (client disconnecting)");
            }
        }
    }
}

async fn send_error(ws_sender: &mut SplitSink<WebSocket, WsFrame>, message: &str) {
    let frame = serde_json::json!({ "type": "error", "message": message }).to_string();
    if ws_sender.send(WsFrame::Text(frame)).await.is_err() {
        tracing::debug!("Failed to send error frame (client disconnecting)");
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/danwa/events", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_deserialize_from_tagged_json() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"join","name":"Ahmed"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Join { name } if name == "Ahmed"));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"message","text":"hey there!"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Message { text } if text == "hey there!"));

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"typing","is_typing":true}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Typing { is_typing: true }));

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Ping));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"dance"}"#).is_err());
    }
}
