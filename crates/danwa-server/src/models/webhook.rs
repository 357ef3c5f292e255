//! Webhook DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use danwa::{RoomWebhook, WebhookDelivery, WebhookEventType};

// ============================================
// Request/Response DTOs
// ============================================

/// Create webhook request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWebhookRequest {
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    /// Event types to subscribe to; defaults to all
    pub events: Option<Vec<String>>,
    pub headers: Option<serde_json::Value>,
    pub max_retries: Option<i32>,
    pub timeout_ms: Option<i32>,
}

/// Update webhook request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWebhookRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub secret: Option<String>,
    pub enabled: Option<bool>,
    pub events: Option<Vec<String>>,
    pub headers: Option<serde_json::Value>,
    pub max_retries: Option<i32>,
    pub timeout_ms: Option<i32>,
}

/// Trigger a test delivery
#[derive(Debug, Deserialize, ToSchema)]
pub struct TriggerWebhookRequest {
    pub event: Option<String>,
    pub data: Option<serde_json::Value>,
}

/// Webhook registration (the secret is never echoed back)
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub has_secret: bool,
    pub enabled: bool,
    pub events: Vec<String>,
    pub max_retries: i32,
    pub timeout_ms: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A webhook delivery attempt
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookDeliveryResponse {
    pub id: Uuid,
    pub webhook_id: Uuid,
    pub event: String,
    pub status: String,
    pub status_code: Option<i32>,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WebhookResponse {
    pub fn from_domain(webhook: RoomWebhook) -> Self {
        Self {
            id: webhook.id,
            name: webhook.name,
            url: webhook.url,
            has_secret: webhook.secret.is_some(),
            enabled: webhook.enabled,
            events: webhook.events.iter().map(|e| e.to_string()).collect(),
            max_retries: webhook.max_retries,
            timeout_ms: webhook.timeout_ms,
            created_at: webhook.created_at,
            updated_at: webhook.updated_at,
        }
    }
}

impl WebhookDeliveryResponse {
    pub fn from_domain(delivery: WebhookDelivery) -> Self {
        Self {
            id: delivery.id,
            webhook_id: delivery.webhook_id,
            event: delivery.payload.event.to_string(),
            status: format!("{:?}", delivery.status).to_lowercase(),
            status_code: delivery.status_code,
            attempts: delivery.attempts,
            created_at: delivery.created_at,
            completed_at: delivery.completed_at,
        }
    }
}

/// Parse event type names from the API surface
///
/// `None` means subscribe to everything; unknown names become Custom events.
pub fn parse_event_types(events: Option<Vec<String>>) -> Vec<WebhookEventType> {
    match events {
        None => vec![WebhookEventType::All],
        Some(names) => names.into_iter().map(|name| parse_event_type(&name)).collect(),
    }
}

pub fn parse_event_type(name: &str) -> WebhookEventType {
    match name {
        "message_posted" => WebhookEventType::MessagePosted,
        "participant_identified" => WebhookEventType::ParticipantIdentified,
        "typing_changed" => WebhookEventType::TypingChanged,
        "all" => WebhookEventType::All,
        other => WebhookEventType::Custom(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_custom_event_types() {
        let parsed = parse_event_types(Some(vec![
            "message_posted".to_string(),
            "typing_changed".to_string(),
            "deploy_finished".to_string(),
        ]));

        assert_eq!(
            parsed,
            vec![
                WebhookEventType::MessagePosted,
                WebhookEventType::TypingChanged,
                WebhookEventType::Custom("deploy_finished".to_string()),
            ]
        );
    }

    #[test]
    fn missing_events_subscribe_to_all() {
        assert_eq!(parse_event_types(None), vec![WebhookEventType::All]);
    }

    #[test]
    fn response_hides_the_secret() {
        let webhook = RoomWebhook::new("w".to_string(), "https://example.com".to_string())
            .with_secret("hush".to_string());

        let response = WebhookResponse::from_domain(webhook);
        assert!(response.has_secret);
    }
}
