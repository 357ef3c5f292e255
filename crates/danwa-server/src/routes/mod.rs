//! Danwa API Routes
//!
//! - /danwa/clients - Client identity mapping (identify, roster, typing)
//! - /danwa/messages - Message posting and listing
//! - /danwa/events - WebSocket gateway (realtime chat protocol)
//! - /danwa/webhooks - Outbound webhook management

pub mod client;
pub mod events;
pub mod message;
pub mod swagger;
pub mod webhook;
