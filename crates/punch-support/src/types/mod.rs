//! Core types for the support bot

pub mod chat;
pub mod document;
pub mod retrieval;

pub use chat::{ChatMessage, ChatReply, ChatRequest, MessagesResponse, StatusMessage};
pub use document::{DocumentMetadata, FaqRecord, IndexedDocument};
pub use retrieval::{RetrievalResult, MISSING_METADATA};
