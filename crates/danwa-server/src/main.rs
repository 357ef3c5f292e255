use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod models;
mod routes;
mod services;

use adapters::{HttpWebhook, MemMessageRepository, MemParticipantRegistry, MemRoomWebhookRepository};
use application::RoomService;
use services::events::EventBus;

/// Type alias for the application service with concrete repository implementations
pub type AppRoomService = RoomService<MemMessageRepository, MemParticipantRegistry>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub room_service: Arc<AppRoomService>,
    pub webhook_repo: Arc<MemRoomWebhookRepository>,
    pub http_webhook: Arc<HttpWebhook>,
    pub event_bus: EventBus,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Danwa API is running - voices gather in the room".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("💬 Danwa API initializing...");

    // Initialize API key from secrets
    if let Some(api_key) = secrets.get("DANWA_API_KEY") {
        auth::init_api_key(api_key);
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No DANWA_API_KEY set - authentication disabled");
    }

    // In-memory room state (lost on restart, per design)
    let messages = Arc::new(MemMessageRepository::new());
    let participants = Arc::new(MemParticipantRegistry::new());
    let webhook_repo = Arc::new(MemRoomWebhookRepository::new());

    // Application services
    let room_service = Arc::new(RoomService::new(messages, participants));
    let http_webhook = Arc::new(HttpWebhook::new());
    let event_bus = EventBus::new(256);

    tracing::info!("🔔 Webhook service initialized");

    // Create application state
    let state = AppState {
        room_service,
        webhook_repo,
        http_webhook,
        event_bus,
    };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::client::router())
        .merge(routes::message::router())
        .merge(routes::webhook::router())
        .layer(middleware::from_fn(auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state; the WebSocket gateway stays outside
    // the Bearer gate (clients self-identify by name over the socket)
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::events::router())
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Danwa API ready - the room is open");

    Ok(router.into())
}
