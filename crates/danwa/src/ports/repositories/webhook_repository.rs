//! RoomWebhook Repository Port
//!
//! Abstract interface for webhook registrations and delivery records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{RoomWebhook, WebhookDelivery, WebhookEventType};
use crate::domain::errors::DomainError;

/// Repository interface for RoomWebhook entities
#[async_trait]
pub trait RoomWebhookRepository: Send + Sync {
    /// Find a webhook by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RoomWebhook>, DomainError>;

    /// Find all registered webhooks
    async fn find_all(&self) -> Result<Vec<RoomWebhook>, DomainError>;

    /// Find all enabled webhooks that subscribe to a specific event
    async fn find_by_event(
        &self,
        event: &WebhookEventType,
    ) -> Result<Vec<RoomWebhook>, DomainError>;

    /// Save a webhook (insert or update)
    async fn save(&self, webhook: &RoomWebhook) -> Result<RoomWebhook, DomainError>;

    /// Delete a webhook by ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Enable/disable a webhook
    async fn set_enabled(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError>;

    // --- Delivery tracking ---

    /// Save a delivery record
    async fn save_delivery(
        &self,
        delivery: &WebhookDelivery,
    ) -> Result<WebhookDelivery, DomainError>;

    /// Find recent deliveries for a webhook, newest first
    async fn find_deliveries(
        &self,
        webhook_id: Uuid,
        limit: usize,
    ) -> Result<Vec<WebhookDelivery>, DomainError>;
}
