//! In-memory implementation of RoomWebhookRepository
//!
//! Registrations live in a Vec (registration order); delivery records are
//! kept in a bounded log, oldest dropped first.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use danwa::{DomainError, RoomWebhook, RoomWebhookRepository, WebhookDelivery, WebhookEventType};

/// Maximum delivery records kept across all webhooks
const DELIVERY_LOG_CAP: usize = 1000;

/// In-memory implementation of RoomWebhookRepository
pub struct MemRoomWebhookRepository {
    webhooks: RwLock<Vec<RoomWebhook>>,
    deliveries: RwLock<Vec<WebhookDelivery>>,
}

impl MemRoomWebhookRepository {
    pub fn new() -> Self {
        Self {
            webhooks: RwLock::new(Vec::new()),
            deliveries: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemRoomWebhookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomWebhookRepository for MemRoomWebhookRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RoomWebhook>, DomainError> {
        let webhooks = self.webhooks.read().await;
        Ok(webhooks.iter().find(|w| w.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<RoomWebhook>, DomainError> {
        let webhooks = self.webhooks.read().await;
        Ok(webhooks.clone())
    }

    async fn find_by_event(
        &self,
        event: &WebhookEventType,
    ) -> Result<Vec<RoomWebhook>, DomainError> {
        let webhooks = self.webhooks.read().await;
        Ok(webhooks
            .iter()
            .filter(|w| w.should_receive(event))
            .cloned()
            .collect())
    }

    async fn save(&self, webhook: &RoomWebhook) -> Result<RoomWebhook, DomainError> {
        let mut webhooks = self.webhooks.write().await;

        let mut saved = webhook.clone();
        saved.updated_at = chrono::Utc::now();

        match webhooks.iter_mut().find(|w| w.id == webhook.id) {
            Some(existing) => *existing = saved.clone(),
            None => webhooks.push(saved.clone()),
        }

        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut webhooks = self.webhooks.write().await;
        let before = webhooks.len();
        webhooks.retain(|w| w.id != id);
        Ok(webhooks.len() < before)
    }

    async fn set_enabled(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError> {
        let mut webhooks = self.webhooks.write().await;
        match webhooks.iter_mut().find(|w| w.id == id) {
            Some(webhook) => {
                webhook.enabled = enabled;
                webhook.updated_at = chrono::Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save_delivery(
        &self,
        delivery: &WebhookDelivery,
    ) -> Result<WebhookDelivery, DomainError> {
        let mut deliveries = self.deliveries.write().await;
        deliveries.push(delivery.clone());

        // Bounded log: drop oldest records
        if deliveries.len() > DELIVERY_LOG_CAP {
            let excess = deliveries.len() - DELIVERY_LOG_CAP;
            deliveries.drain(..excess);
        }

        Ok(delivery.clone())
    }

    async fn find_deliveries(
        &self,
        webhook_id: Uuid,
        limit: usize,
    ) -> Result<Vec<WebhookDelivery>, DomainError> {
        let deliveries = self.deliveries.read().await;
        Ok(deliveries
            .iter()
            .rev()
            .filter(|d| d.webhook_id == webhook_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use danwa::WebhookPayload;

    fn webhook_for(events: Vec<WebhookEventType>) -> RoomWebhook {
        RoomWebhook::new("test".to_string(), "https://example.com/hook".to_string())
            .with_events(events)
    }

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let repo = MemRoomWebhookRepository::new();
        let webhook = webhook_for(vec![WebhookEventType::All]);

        repo.save(&webhook).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 1);

        let mut renamed = webhook.clone();
        renamed.name = "renamed".to_string();
        repo.save(&renamed).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "renamed");
    }

    #[tokio::test]
    async fn find_by_event_skips_disabled_and_unsubscribed() {
        let repo = MemRoomWebhookRepository::new();

        let subscribed = webhook_for(vec![WebhookEventType::MessagePosted]);
        let other = webhook_for(vec![WebhookEventType::TypingChanged]);
        let mut disabled = webhook_for(vec![WebhookEventType::All]);
        disabled.enabled = false;

        repo.save(&subscribed).await.unwrap();
        repo.save(&other).await.unwrap();
        repo.save(&disabled).await.unwrap();

        let matching = repo
            .find_by_event(&WebhookEventType::MessagePosted)
            .await
            .unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].id, subscribed.id);
    }

    #[tokio::test]
    async fn deliveries_are_newest_first_and_scoped() {
        let repo = MemRoomWebhookRepository::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        for i in 0..3 {
            let payload = WebhookPayload::new(
                WebhookEventType::MessagePosted,
                serde_json::json!({ "seq": i }),
            );
            let delivery = WebhookDelivery::new(a, payload).success(200, None);
            repo.save_delivery(&delivery).await.unwrap();
        }
        let payload = WebhookPayload::new(WebhookEventType::MessagePosted, serde_json::json!({}));
        repo.save_delivery(&WebhookDelivery::new(b, payload))
            .await
            .unwrap();

        let found = repo.find_deliveries(a, 2).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].payload.data["seq"], 2);
        assert!(found.iter().all(|d| d.webhook_id == a));
    }

    #[tokio::test]
    async fn set_enabled_toggles() {
        let repo = MemRoomWebhookRepository::new();
        let webhook = webhook_for(vec![WebhookEventType::All]);
        repo.save(&webhook).await.unwrap();

        assert!(repo.set_enabled(webhook.id, false).await.unwrap());
        let found = repo.find_by_id(webhook.id).await.unwrap().unwrap();
        assert!(!found.enabled);

        assert!(!repo.set_enabled(Uuid::new_v4(), true).await.unwrap());
    }
}
