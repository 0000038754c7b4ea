//! Conversation orchestration: retrieve, prompt, complete, split, remember

use std::sync::Arc;
use std::time::Instant;

use crate::config::ChatConfig;
use crate::error::Result;
use crate::generation::{split_reply, PromptBuilder};
use crate::providers::ChatCompletionProvider;
use crate::retrieval::FaqIndex;
use crate::session::SessionStore;
use crate::types::{ChatMessage, ChatReply};

/// Greeting shown when a chat window opens
pub const WELCOME_MESSAGES: [&str; 2] = [
    "👋 Hi there! I’m Punch Support Assistant.",
    "How can I help you today?",
];

/// Answers customer questions for a session
pub struct ConversationOrchestrator {
    index: Arc<FaqIndex>,
    llm: Arc<dyn ChatCompletionProvider>,
    sessions: Arc<dyn SessionStore>,
    temperature: f32,
    history_window: usize,
    top_k: usize,
}

impl ConversationOrchestrator {
    pub fn new(
        index: Arc<FaqIndex>,
        llm: Arc<dyn ChatCompletionProvider>,
        sessions: Arc<dyn SessionStore>,
        chat: &ChatConfig,
        temperature: f32,
    ) -> Self {
        Self {
            index,
            llm,
            sessions,
            temperature,
            history_window: chat.history_window,
            top_k: chat.top_k,
        }
    }

    /// Session store shared with the HTTP layer
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Build the message list for a question without calling the model
    pub async fn build_prompt(&self, session_id: &str, query: &str) -> Result<Vec<ChatMessage>> {
        let history = self.sessions.recent(session_id, self.history_window);
        let matches = self.index.query(query, self.top_k).await?;
        let context = PromptBuilder::build_context(&matches);

        Ok(PromptBuilder::build_messages(&history, &context, query))
    }

    /// Answer `query` in the context of `session_id`
    pub async fn reply(&self, session_id: &str, query: &str) -> Result<ChatReply> {
        let start = Instant::now();
        tracing::info!("Chat [{}]: \"{}\"", session_id, query);

        let messages = self.build_prompt(session_id, query).await?;
        let answer = self.llm.complete(&messages, self.temperature).await?;
        let chunks = split_reply(&answer);

        self.sessions.append_all(
            session_id,
            vec![ChatMessage::user(query), ChatMessage::assistant(answer)],
        );

        tracing::info!(
            "Chat [{}] answered in {}ms ({} parts, model {})",
            session_id,
            start.elapsed().as_millis(),
            chunks.len(),
            self.llm.model()
        );

        Ok(ChatReply {
            session_id: session_id.to_string(),
            messages: chunks,
        })
    }

    /// Forget a session; unknown sessions are fine
    pub fn reset(&self, session_id: &str) -> String {
        if self.sessions.reset(session_id) {
            tracing::info!("Session {} cleared", session_id);
        } else {
            tracing::debug!("Reset of unknown session {}", session_id);
        }
        format!("Session {} cleared.", session_id)
    }
}
