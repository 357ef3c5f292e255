//! Server-side services
//!
//! - `events`: broadcast bus feeding the WebSocket gateway
//! - `dispatch`: fans room events out to subscribers and webhooks

pub mod dispatch;
pub mod events;
