//! Event Dispatch
//!
//! Single place where a room event becomes visible to the outside:
//! it is broadcast to WebSocket subscribers and fanned out to every
//! registered webhook that subscribes to the event type. Webhook
//! deliveries run in spawned tasks so the caller never waits on
//! external endpoints.

use danwa::{ChatEvent, OutboundWebhook, RoomWebhookRepository, WebhookPayload};

use crate::AppState;

/// Broadcast an event and fan it out to matching webhooks
pub async fn dispatch_event(state: &AppState, event: ChatEvent) {
    state.event_bus.publish(event.clone());

    let webhook_event = event.webhook_event();
    let webhooks = match state.webhook_repo.find_by_event(&webhook_event).await {
        Ok(webhooks) => webhooks,
        Err(e) => {
            tracing::warn!("Failed to look up webhooks for {}: {}", webhook_event, e);
            return;
        }
    };

    for webhook in webhooks {
        let payload = WebhookPayload::new(webhook_event.clone(), event.payload_data());
        let repo = state.webhook_repo.clone();
        let transport = state.http_webhook.clone();

        tokio::spawn(async move {
            match transport.deliver_with_retry(&webhook, &payload).await {
                Ok(delivery) => {
                    if let Err(e) = repo.save_delivery(&delivery).await {
                        tracing::warn!("Failed to record webhook delivery: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Webhook delivery to {} failed: {}", webhook.url, e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        HttpWebhook, MemMessageRepository, MemParticipantRegistry, MemRoomWebhookRepository,
    };
    use crate::application::RoomService;
    use crate::services::events::EventBus;
    use danwa::Message;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            room_service: Arc::new(RoomService::new(
                Arc::new(MemMessageRepository::new()),
                Arc::new(MemParticipantRegistry::new()),
            )),
            webhook_repo: Arc::new(MemRoomWebhookRepository::new()),
            http_webhook: Arc::new(HttpWebhook::new()),
            event_bus: EventBus::new(16),
        }
    }

    #[tokio::test]
    async fn dispatch_reaches_bus_subscribers() {
        let state = state();
        let mut rx = state.event_bus.subscribe();

        let event = ChatEvent::MessagePosted {
            message: Message::new("c1", "Ahmed", "hey there!"),
        };
        dispatch_event(&state, event).await;

        let received = rx.recv().await.unwrap();
        assert!(matches!(received, ChatEvent::MessagePosted { .. }));
    }
}
