//! Danwa API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API Client for Danwa
pub struct DanwaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
pub struct IdentifyRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct IdentifyResponse {
    pub client_id: String,
    pub name: String,
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    pub posted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantResponse {
    pub client_id: String,
    pub name: String,
}

impl DanwaClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Identify a client under a display name
    pub async fn identify(&self, client_id: &str, name: &str) -> Result<IdentifyResponse> {
        let url = format!("{}/danwa/clients/{}/identify", self.base_url, client_id);

        let request = IdentifyRequest {
            name: name.to_string(),
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to Danwa API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let identified: IdentifyResponse =
            resp.json().await.context("Failed to parse response")?;

        Ok(identified)
    }

    /// Post a message as a client
    pub async fn post_message(&self, client_id: &str, text: &str) -> Result<MessageResponse> {
        let url = format!("{}/danwa/messages", self.base_url);

        let request = CreateMessageRequest {
            text: text.to_string(),
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Danwa-Client-Id", client_id)
            .json(&request)
            .send()
            .await
            .context("Failed to connect to Danwa API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let message: MessageResponse = resp.json().await.context("Failed to parse response")?;

        Ok(message)
    }

    /// List messages, optionally only the most recent `limit`
    pub async fn list_messages(&self, limit: Option<usize>) -> Result<Vec<MessageResponse>> {
        let url = match limit {
            Some(limit) => format!("{}/danwa/messages?limit={}", self.base_url, limit),
            None => format!("{}/danwa/messages", self.base_url),
        };

        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to connect to Danwa API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let messages: Vec<MessageResponse> =
            resp.json().await.context("Failed to parse response")?;

        Ok(messages)
    }

    /// List identified participants
    pub async fn roster(&self) -> Result<Vec<ParticipantResponse>> {
        let url = format!("{}/danwa/clients", self.base_url);

        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Failed to connect to Danwa API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        let participants: Vec<ParticipantResponse> =
            resp.json().await.context("Failed to parse response")?;

        Ok(participants)
    }
}
