//! API Key Authentication (Bearer Token)
//!
//! Guards the management surface of the API. The chat domain itself has no
//! user authentication: clients self-identify by name.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

/// API key loaded from Shuttle secrets at startup
static API_KEY: std::sync::OnceLock<String> = std::sync::OnceLock::new();

/// Initialize the API key
pub fn init_api_key(key: String) {
    let _ = API_KEY.set(key);
}

fn configured_key() -> Option<&'static str> {
    API_KEY.get().map(|s| s.as_str()).filter(|k| !k.is_empty())
}

/// Authentication middleware
/// Validates the Bearer token against the configured API key
pub async fn auth_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let Some(api_key) = configured_key() else {
        // No API key configured = auth disabled (for development)
        tracing::warn!("No API key configured, authentication disabled");
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if token == api_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempted");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
