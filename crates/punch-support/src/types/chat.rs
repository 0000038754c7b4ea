//! Chat messages and the HTTP request/response bodies built from them

use serde::{Deserialize, Serialize};

/// A role-tagged chat message
///
/// Serializes to the `{"role": ..., "content": ...}` shape used by chat-completion APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    /// Instructions for the model
    System { content: String },
    /// Something the customer said
    User { content: String },
    /// Something the bot replied
    Assistant { content: String },
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
        }
    }

    /// Message text
    pub fn content(&self) -> &str {
        match self {
            Self::System { content } | Self::User { content } | Self::Assistant { content } => {
                content
            }
        }
    }

    /// Role name as sent on the wire
    pub fn role(&self) -> &'static str {
        match self {
            Self::System { .. } => "system",
            Self::User { .. } => "user",
            Self::Assistant { .. } => "assistant",
        }
    }

    /// Whether this is a conversational turn (user or assistant)
    pub fn is_turn(&self) -> bool {
        !matches!(self, Self::System { .. })
    }
}

/// POST /chat body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Client-chosen conversation identifier
    pub session_id: String,
    /// The customer's question
    pub query: String,
}

/// POST /chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Echo of the request's session
    pub session_id: String,
    /// Reply split into display-sized bubbles
    pub messages: Vec<String>,
}

/// Response carrying a list of bubbles without a session (GET /welcome)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<String>,
}

/// Response carrying a single status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
