//! Provider abstractions for embeddings, chat completion and vector storage
//!
//! This module provides trait-based abstractions that allow switching between
//! an in-process collection and a Chroma server, and that let tests swap in
//! fake model backends.

pub mod chroma;
pub mod embedding;
pub mod llm;
pub mod memory;
pub mod openai;
pub mod vector_store;

pub use chroma::ChromaCollection;
pub use embedding::EmbeddingProvider;
pub use llm::ChatCompletionProvider;
pub use memory::InMemoryCollection;
pub use openai::{OpenAiChat, OpenAiClient, OpenAiEmbedder};
pub use vector_store::{VectorMatch, VectorStoreProvider};
