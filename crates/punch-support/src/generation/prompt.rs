//! Prompt templates for support replies

use crate::types::{ChatMessage, RetrievalResult};

/// Reply the model is told to give when the FAQ context falls short
pub const FALLBACK_REPLY: &str = "I'm sorry, but I don't have enough details to resolve this query right now. \
Would you like me to connect you with our support team? They'll be happy to help you further.";

/// Prompt builder for support conversations
pub struct PromptBuilder;

impl PromptBuilder {
    /// Fixed system instruction: persona, brevity, fallback
    pub fn system_prompt() -> String {
        format!(
            "You are a friendly Punch customer support assistant. \
             Use the FAQ context to answer the user's query briefly in clear, readable parts. \
             Each part should be at most 2–3 lines long. \
             If the context does not contain enough information, reply with: '{}'",
            FALLBACK_REPLY
        )
    }

    /// Join retrieved answers with blank lines; empty when nothing matched
    pub fn build_context(results: &[RetrievalResult]) -> String {
        results
            .iter()
            .map(|r| r.answer.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Final user message combining retrieval context and the question
    pub fn build_question(context: &str, query: &str) -> String {
        format!("Context:\n{}\n\nUser Question: {}", context, query)
    }

    /// Full message list: system, prior user/assistant turns, then the question
    pub fn build_messages(history: &[ChatMessage], context: &str, query: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(Self::system_prompt()));
        messages.extend(history.iter().filter(|m| m.is_turn()).cloned());
        messages.push(ChatMessage::user(Self::build_question(context, query)));
        messages
    }
}
