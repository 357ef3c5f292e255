//! In-memory implementation of ParticipantRegistry
//!
//! The roster is a Vec so that names keep their join order; re-identifying
//! an existing client renames it in place.

use async_trait::async_trait;
use tokio::sync::RwLock;

use danwa::{DomainError, Participant, ParticipantRegistry};

/// In-memory implementation of ParticipantRegistry
pub struct MemParticipantRegistry {
    roster: RwLock<Vec<Participant>>,
}

impl MemParticipantRegistry {
    pub fn new() -> Self {
        Self {
            roster: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParticipantRegistry for MemParticipantRegistry {
    async fn identify(&self, client_id: &str, name: &str) -> Result<Vec<String>, DomainError> {
        let mut roster = self.roster.write().await;

        match roster.iter_mut().find(|p| p.client_id == client_id) {
            Some(participant) => participant.rename(name),
            None => roster.push(Participant::new(client_id, name)),
        }

        Ok(roster.iter().map(|p| p.name.clone()).collect())
    }

    async fn find_by_client(&self, client_id: &str) -> Result<Option<Participant>, DomainError> {
        let roster = self.roster.read().await;
        Ok(roster.iter().find(|p| p.client_id == client_id).cloned())
    }

    async fn list_names(&self) -> Result<Vec<String>, DomainError> {
        let roster = self.roster.read().await;
        Ok(roster.iter().map(|p| p.name.clone()).collect())
    }

    async fn list_all(&self) -> Result<Vec<Participant>, DomainError> {
        let roster = self.roster.read().await;
        Ok(roster.clone())
    }

    async fn remove(&self, client_id: &str) -> Result<bool, DomainError> {
        let mut roster = self.roster.write().await;
        let before = roster.len();
        roster.retain(|p| p.client_id != client_id);
        Ok(roster.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identify_returns_all_known_names() {
        let registry = MemParticipantRegistry::new();

        let names = registry.identify("c1", "Ahmed").await.unwrap();
        assert_eq!(names, vec!["Ahmed"]);

        let names = registry.identify("c2", "Mai").await.unwrap();
        assert_eq!(names, vec!["Ahmed", "Mai"]);
    }

    #[tokio::test]
    async fn reidentify_renames_in_place() {
        let registry = MemParticipantRegistry::new();
        registry.identify("c1", "Ahmed").await.unwrap();
        registry.identify("c2", "Mai").await.unwrap();

        // c1 picks a new name; roster position is kept
        let names = registry.identify("c1", "Ahmad").await.unwrap();
        assert_eq!(names, vec!["Ahmad", "Mai"]);

        let participant = registry.find_by_client("c1").await.unwrap().unwrap();
        assert_eq!(participant.name, "Ahmad");
    }

    #[tokio::test]
    async fn unknown_client_is_none() {
        let registry = MemParticipantRegistry::new();
        assert!(registry.find_by_client("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_drops_the_client() {
        let registry = MemParticipantRegistry::new();
        registry.identify("c1", "Ahmed").await.unwrap();

        assert!(registry.remove("c1").await.unwrap());
        assert!(!registry.remove("c1").await.unwrap());
        assert!(registry.list_names().await.unwrap().is_empty());
    }
}
