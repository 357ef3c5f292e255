//! Participant Registry Port
//!
//! Abstract interface for the client-to-name identity mapping.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Participant};

/// Registry interface for Participant identities
#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    /// Insert or overwrite the mapping `client_id -> name`.
    ///
    /// Returns all known names after the change, in roster order.
    async fn identify(&self, client_id: &str, name: &str) -> Result<Vec<String>, DomainError>;

    /// Find the participant for a client, if identified
    async fn find_by_client(&self, client_id: &str) -> Result<Option<Participant>, DomainError>;

    /// All known names in roster order
    async fn list_names(&self) -> Result<Vec<String>, DomainError>;

    /// All participants in roster order
    async fn list_all(&self) -> Result<Vec<Participant>, DomainError>;

    /// Remove a client from the roster (e.g., on disconnect)
    async fn remove(&self, client_id: &str) -> Result<bool, DomainError>;
}
