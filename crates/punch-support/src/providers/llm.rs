//! Chat-completion provider trait for generating replies

use async_trait::async_trait;
use crate::error::Result;
use crate::types::ChatMessage;

/// Trait for chat-completion backends
///
/// Implementations:
/// - `OpenAiChat`: OpenAI chat completions API (gpt-4o-mini)
#[async_trait]
pub trait ChatCompletionProvider: Send + Sync {
    /// Complete an ordered, role-tagged conversation and return the reply text
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
