//! ChatEvent - Room happenings
//!
//! Events emitted by the room and pushed to the realtime layer
//! (WebSocket broadcast) and to registered webhooks.

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::webhook::WebhookEventType;

/// Events emitted by the room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A message was posted to the room
    MessagePosted { message: Message },

    /// A client identified itself (joined or renamed)
    ParticipantIdentified {
        client_id: String,
        name: String,
        /// All known names after this identification
        names: Vec<String>,
    },

    /// A client started or stopped typing
    Typing {
        client_id: String,
        name: String,
        is_typing: bool,
    },
}

impl ChatEvent {
    /// Get the client ID that caused the event
    pub fn client_id(&self) -> &str {
        match self {
            Self::MessagePosted { message } => &message.client_id,
            Self::ParticipantIdentified { client_id, .. } => client_id,
            Self::Typing { client_id, .. } => client_id,
        }
    }

    /// Get the display name associated with the event
    pub fn name(&self) -> &str {
        match self {
            Self::MessagePosted { message } => &message.name,
            Self::ParticipantIdentified { name, .. } => name,
            Self::Typing { name, .. } => name,
        }
    }

    /// The webhook event type this room event maps to
    pub fn webhook_event(&self) -> WebhookEventType {
        match self {
            Self::MessagePosted { .. } => WebhookEventType::MessagePosted,
            Self::ParticipantIdentified { .. } => WebhookEventType::ParticipantIdentified,
            Self::Typing { .. } => WebhookEventType::TypingChanged,
        }
    }

    /// Event-specific data for webhook payloads
    pub fn payload_data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snake_case_tag() {
        let event = ChatEvent::Typing {
            client_id: "c1".to_string(),
            name: "Ahmed".to_string(),
            is_typing: true,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "typing");
        assert_eq!(json["is_typing"], true);
    }

    #[test]
    fn maps_to_webhook_event_types() {
        let event = ChatEvent::MessagePosted {
            message: Message::new("c1", "Ahmed", "hey there!"),
        };
        assert_eq!(event.webhook_event(), WebhookEventType::MessagePosted);
        assert_eq!(event.client_id(), "c1");
        assert_eq!(event.name(), "Ahmed");
    }
}
