//! OpenAI client and the providers built on it
//!
//! One `OpenAiClient` is shared by the embedder and the chat provider.
//! Requests are sent once; failures go straight back to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::OpenAiConfig;
use crate::error::{Error, Result};
use crate::types::ChatMessage;

use super::embedding::EmbeddingProvider;
use super::llm::ChatCompletionProvider;

/// OpenAI REST API client
pub struct OpenAiClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("OpenAI API key not provided".to_string()))
    }

    /// Chat-completion model name
    pub fn chat_model(&self) -> &str {
        &self.config.chat_model
    }

    /// Check if the API is reachable with the configured key
    pub async fn health_check(&self) -> Result<bool> {
        let api_key = self.api_key()?;

        match self
            .client
            .get(self.url("models"))
            .bearer_auth(api_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Embed a batch of texts, preserving input order
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.config.embed_model,
            input: texts,
        };

        tracing::debug!("Requesting {} embeddings from {}", texts.len(), self.config.embed_model);

        let response = self
            .client
            .post(self.url("embeddings"))
            .bearer_auth(self.api_key()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Embedding failed: HTTP {} - {}",
                status, body
            )));
        }

        let mut embed_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        if embed_response.data.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embed_response.data.len()
            )));
        }

        embed_response.data.sort_by_key(|d| d.index);
        Ok(embed_response.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Run a chat completion and return the first choice's text
    pub async fn chat(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.config.chat_model,
            messages,
            temperature,
        };

        tracing::info!(
            "Requesting completion from {} ({} messages)",
            self.config.chat_model,
            messages.len()
        );

        let response = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(self.api_key()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::completion(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::completion(format!(
                "Completion failed: HTTP {} - {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::completion(format!("Failed to parse completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::completion("Completion returned no content"))
    }
}

/// OpenAI embedding provider
pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
}

impl OpenAiEmbedder {
    /// Create from existing OpenAiClient
    pub fn from_client(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client
            .embed(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| Error::embedding("No embedding in response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.client.embed(texts).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// OpenAI chat-completion provider
pub struct OpenAiChat {
    client: Arc<OpenAiClient>,
    model: String,
}

impl OpenAiChat {
    /// Create from existing OpenAiClient
    pub fn from_client(client: Arc<OpenAiClient>) -> Self {
        let model = client.chat_model().to_string();
        Self { client, model }
    }
}

#[async_trait]
impl ChatCompletionProvider for OpenAiChat {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        self.client.chat(messages, temperature).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
