//! Participant Entity
//!
//! The client-to-name identity mapping. A participant is created the first
//! time a client identifies itself; re-identifying updates the name in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant in the room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Connection-scoped client ID (socket ID or generated UUID)
    pub client_id: String,
    /// Display name the client identified under
    pub name: String,
    /// When the client first identified
    pub identified_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant with the current timestamp
    pub fn new(client_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            name: name.into(),
            identified_at: Utc::now(),
        }
    }

    /// Replace the display name, keeping identity and join time
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
