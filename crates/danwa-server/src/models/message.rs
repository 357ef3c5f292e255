//! Message and client DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use danwa::{Message, Participant};

// ============================================
// Request/Response DTOs
// ============================================

/// Identify request: bind a display name to a client
#[derive(Debug, Deserialize, ToSchema)]
pub struct IdentifyRequest {
    pub name: String,
}

/// Identify response: the names of everyone in the room
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentifyResponse {
    pub client_id: String,
    pub name: String,
    pub names: Vec<String>,
}

/// A participant in the room
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub client_id: String,
    pub name: String,
    pub identified_at: DateTime<Utc>,
}

/// Create message request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    pub text: String,
}

/// A chat message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub client_id: String,
    pub name: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// Typing state change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TypingRequest {
    pub is_typing: bool,
}

/// Query parameters for listing messages
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMessagesQuery {
    /// Return only the most recent `limit` messages
    pub limit: Option<usize>,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            client_id: participant.client_id,
            name: participant.name,
            identified_at: participant.identified_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            client_id: message.client_id,
            name: message.name,
            text: message.text,
            posted_at: message.posted_at,
        }
    }
}
