//! Danwa Domain Library
//!
//! Core domain types and interfaces for the Danwa chat room service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Message, Participant, RoomWebhook, ChatEvent)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `webhook`: Outbound delivery interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use danwa::domain::{Message, Participant};
//! use danwa::ports::{MessageRepository, ParticipantRegistry};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ChatEvent, DeliveryStatus, DomainError, Message, Participant, RoomWebhook, WebhookDelivery,
    WebhookEventType, WebhookPayload,
};
pub use ports::{
    MessageRepository, OutboundWebhook, ParticipantRegistry, RoomWebhookRepository,
    WebhookDeliveryConfig,
};
