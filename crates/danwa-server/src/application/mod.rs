//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the registry and the message store.

mod room_service;

pub use room_service::RoomService;
