//! In-memory implementations of the repository ports
//!
//! Backed by `tokio::sync::RwLock`; nothing survives a restart.

mod message_repository;
mod participant_registry;
mod webhook_repository;

pub use message_repository::MemMessageRepository;
pub use participant_registry::MemParticipantRegistry;
pub use webhook_repository::MemRoomWebhookRepository;
