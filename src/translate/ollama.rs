use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{TranslationProvider, TranslationRequest};
use crate::config::OllamaConfig;
use crate::error::{Result, TranslationError};
use crate::setup::ModelStore;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    model: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for a local ollama server.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        // No client-wide timeout: pulls can take far longer than a chat call.
        let client = Client::builder()
            .user_agent(concat!("translation-master/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.endpoint, path)
    }
}

#[async_trait]
impl TranslationProvider for OllamaClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let url = self.url("chat");
        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
        };

        debug!("Sending chat request to: {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::Provider(format!(
                "Ollama API error {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Provider(format!("Failed to parse response: {}", e)))?;

        Ok(chat.message.content)
    }
}

#[async_trait]
impl ModelStore for OllamaClient {
    async fn installed_models(&self) -> Result<Vec<String>> {
        let url = self.url("tags");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                TranslationError::Provider(format!(
                    "Failed to connect to Ollama at {}: {}",
                    self.endpoint, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(TranslationError::Provider(format!(
                "Ollama model listing failed: HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn pull_model(&self, model: &str) -> Result<()> {
        let url = self.url("pull");
        info!("Pulling model {} from {}", model, self.endpoint);

        let response = self
            .client
            .post(&url)
            .json(&PullRequest {
                model,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| TranslationError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<PullResponse>(&text).ok();

        if let Some(error) = parsed.as_ref().and_then(|p| p.error.clone()) {
            return Err(TranslationError::Provider(error));
        }
        if !status.is_success() {
            return Err(TranslationError::Provider(format!(
                "Ollama pull failed {}: {}",
                status, text
            )));
        }

        debug!(
            "Pull finished with status: {}",
            parsed.map(|p| p.status).unwrap_or_default()
        );
        Ok(())
    }
}
