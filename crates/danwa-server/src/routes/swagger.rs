//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa. The WebSocket gateway
//! at /danwa/events is documented in `routes::events` instead; OpenAPI
//! has no vocabulary for it.

use utoipa::OpenApi;

use crate::models::{
    CreateMessageRequest,
    CreateWebhookRequest,
    // Client models
    IdentifyRequest,
    IdentifyResponse,
    // Message models
    MessageResponse,
    ParticipantResponse,
    TriggerWebhookRequest,
    TypingRequest,
    UpdateWebhookRequest,
    WebhookDeliveryResponse,
    // Webhook models
    WebhookResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Client endpoints
        super::client::identify,
        super::client::get_client,
        super::client::list_clients,
        super::client::typing,
        // Message endpoints
        super::message::create_message,
        super::message::list_messages,
        // Webhook endpoints
        super::webhook::list_webhooks,
        super::webhook::create_webhook,
        super::webhook::get_webhook,
        super::webhook::update_webhook,
        super::webhook::delete_webhook,
        super::webhook::trigger_webhook,
        super::webhook::list_deliveries,
    ),
    info(
        title = "Danwa API",
        version = "0.1.0",
        description = "談話 (Conversation) - In-memory chat room API\n\nClients identify by name, post messages, and listen on the WebSocket gateway.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Client", description = "Client identity mapping (who is in the room)"),
        (name = "Message", description = "The room's message list"),
        (name = "Webhook", description = "Outbound webhooks - pushing room events out"),
    ),
    components(
        schemas(
            // Client
            IdentifyRequest,
            IdentifyResponse,
            ParticipantResponse,
            TypingRequest,
            // Message
            CreateMessageRequest,
            MessageResponse,
            // Webhook
            CreateWebhookRequest,
            UpdateWebhookRequest,
            TriggerWebhookRequest,
            WebhookResponse,
            WebhookDeliveryResponse,
        )
    ),
)]
pub struct ApiDoc;
