//! Message Repository Port
//!
//! Abstract interface for the room's message list.
//! The list is append-only; order is insertion order.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Message};

/// Repository interface for Message entities
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to the room
    async fn append(&self, message: Message) -> Result<Message, DomainError>;

    /// All messages in insertion order
    async fn find_all(&self) -> Result<Vec<Message>, DomainError>;

    /// The most recent `limit` messages, still in insertion order
    async fn find_recent(&self, limit: usize) -> Result<Vec<Message>, DomainError>;

    /// Number of messages in the room
    async fn count(&self) -> Result<usize, DomainError>;
}
