//! In-memory implementation of MessageRepository
//!
//! An append-only Vec behind an RwLock. Insertion order is the only
//! ordering the room guarantees.

use async_trait::async_trait;
use tokio::sync::RwLock;

use danwa::{DomainError, Message, MessageRepository};

/// In-memory implementation of MessageRepository
pub struct MemMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl MemMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    async fn append(&self, message: Message) -> Result<Message, DomainError> {
        let mut messages = self.messages.write().await;
        messages.push(message.clone());
        Ok(message)
    }

    async fn find_all(&self) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        Ok(messages.clone())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let messages = self.messages.read().await;
        Ok(messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let repo = MemMessageRepository::new();

        repo.append(Message::new("c1", "Ahmed", "first")).await.unwrap();
        repo.append(Message::new("c2", "Mai", "second")).await.unwrap();
        repo.append(Message::new("c1", "Ahmed", "third")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        let texts: Vec<&str> = all.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn find_recent_returns_tail_in_order() {
        let repo = MemMessageRepository::new();
        for i in 0..5 {
            repo.append(Message::new("c1", "Ahmed", format!("m{i}")))
                .await
                .unwrap();
        }

        let recent = repo.find_recent(2).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m4"]);
    }

    #[tokio::test]
    async fn find_recent_with_large_limit_returns_everything() {
        let repo = MemMessageRepository::new();
        repo.append(Message::new("c1", "Ahmed", "only")).await.unwrap();

        let recent = repo.find_recent(100).await.unwrap();
        assert_eq!(recent.len(), 1);
    }
}
