//! Room Application Service (Use Case)
//!
//! Orchestrates the chat room: identity mapping, message posting,
//! and listing. This is the whole of the room's business logic.

use std::sync::Arc;

use danwa::{DomainError, Message, MessageRepository, Participant, ParticipantRegistry};

/// Application service for room operations
pub struct RoomService<M: MessageRepository, P: ParticipantRegistry> {
    messages: Arc<M>,
    participants: Arc<P>,
}

impl<M: MessageRepository, P: ParticipantRegistry> RoomService<M, P> {
    pub fn new(messages: Arc<M>, participants: Arc<P>) -> Self {
        Self {
            messages,
            participants,
        }
    }

    /// Record `client_id -> name`; returns all known names in roster order
    pub async fn identify(&self, client_id: &str, name: &str) -> Result<Vec<String>, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".to_string()));
        }

        let names = self.participants.identify(client_id, name).await?;

        tracing::info!("Identified client {} as {}", client_id, name);

        Ok(names)
    }

    /// Look up the display name for a client
    pub async fn client_name(&self, client_id: &str) -> Result<Option<String>, DomainError> {
        let participant = self.participants.find_by_client(client_id).await?;
        Ok(participant.map(|p| p.name))
    }

    /// Look up the full participant record for a client
    pub async fn participant(&self, client_id: &str) -> Result<Option<Participant>, DomainError> {
        self.participants.find_by_client(client_id).await
    }

    /// All participants in roster order
    pub async fn roster(&self) -> Result<Vec<Participant>, DomainError> {
        self.participants.list_all().await
    }

    /// Post a message. The poster must have identified first.
    pub async fn post(&self, client_id: &str, text: &str) -> Result<Message, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("text must not be empty".to_string()));
        }

        let participant = self
            .participants
            .find_by_client(client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Participant", client_id))?;

        let message = Message::new(client_id, participant.name, text);
        let saved = self.messages.append(message).await?;

        tracing::info!("Message posted by {} ({})", saved.name, saved.client_id);

        Ok(saved)
    }

    /// All messages in insertion order
    pub async fn list(&self) -> Result<Vec<Message>, DomainError> {
        self.messages.find_all().await
    }

    /// The most recent `limit` messages, in insertion order
    pub async fn recent(&self, limit: usize) -> Result<Vec<Message>, DomainError> {
        self.messages.find_recent(limit).await
    }

    /// Drop a client from the roster (disconnect)
    pub async fn leave(&self, client_id: &str) -> Result<bool, DomainError> {
        let removed = self.participants.remove(client_id).await?;
        if removed {
            tracing::info!("Client {} left the room", client_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemMessageRepository, MemParticipantRegistry};

    fn service() -> RoomService<MemMessageRepository, MemParticipantRegistry> {
        RoomService::new(
            Arc::new(MemMessageRepository::new()),
            Arc::new(MemParticipantRegistry::new()),
        )
    }

    #[tokio::test]
    async fn post_uses_the_identified_name() {
        let room = service();
        room.identify("c1", "Ahmed").await.unwrap();

        let message = room.post("c1", "hey there!").await.unwrap();
        assert_eq!(message.name, "Ahmed");
        assert_eq!(message.text, "hey there!");

        let all = room.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, message.id);
    }

    #[tokio::test]
    async fn post_without_identify_is_not_found() {
        let room = service();

        let err = room.post("ghost", "hello").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(room.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn identify_rejects_empty_names() {
        let room = service();

        let err = room.identify("c1", "   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn post_rejects_empty_text() {
        let room = service();
        room.identify("c1", "Ahmed").await.unwrap();

        let err = room.post("c1", "").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn renaming_applies_to_later_messages_only() {
        let room = service();
        room.identify("c1", "Ahmed").await.unwrap();
        room.post("c1", "first").await.unwrap();

        room.identify("c1", "Ahmad").await.unwrap();
        room.post("c1", "second").await.unwrap();

        let all = room.list().await.unwrap();
        assert_eq!(all[0].name, "Ahmed");
        assert_eq!(all[1].name, "Ahmad");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order_across_clients() {
        let room = service();
        room.identify("c1", "Ahmed").await.unwrap();
        room.identify("c2", "Mai").await.unwrap();

        room.post("c1", "one").await.unwrap();
        room.post("c2", "two").await.unwrap();
        room.post("c1", "three").await.unwrap();

        let texts: Vec<String> = room
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
