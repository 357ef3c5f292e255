//! Message Entity
//!
//! A chat message posted to the room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    /// Client that posted the message
    pub client_id: String,
    /// Display name of the poster at post time
    pub name: String,
    /// Message content
    pub text: String,
    /// When the message was posted
    pub posted_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message with generated ID and timestamp
    pub fn new(
        client_id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id: client_id.into(),
            name: name.into(),
            text: text.into(),
            posted_at: Utc::now(),
        }
    }

    /// Set timestamp
    pub fn with_posted_at(mut self, posted_at: DateTime<Utc>) -> Self {
        self.posted_at = posted_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_id_and_timestamp() {
        let message = Message::new("client-1", "Ahmed", "hey there!");

        assert_eq!(message.client_id, "client-1");
        assert_eq!(message.name, "Ahmed");
        assert_eq!(message.text, "hey there!");
        assert!(!message.id.is_nil());
    }
}
