//! punch-support: FAQ-grounded customer-support chat backend
//!
//! Answers customer questions by retrieving the closest FAQ entries from a
//! vector collection and handing them, with the recent conversation, to a
//! chat-completion model. Sessions are kept in memory for the life of the
//! process.

pub mod config;
pub mod conversation;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use config::SupportConfig;
pub use conversation::ConversationOrchestrator;
pub use error::{Error, Result};
pub use retrieval::FaqIndex;
pub use session::{InMemorySessionStore, SessionStore};
pub use types::{
    chat::{ChatMessage, ChatReply, ChatRequest},
    document::{FaqRecord, IndexedDocument},
    retrieval::RetrievalResult,
};
