//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::sync::Arc;

use punch_support::error::{Error, Result};
use punch_support::providers::{
    ChatCompletionProvider, EmbeddingProvider, InMemoryCollection, VectorMatch,
    VectorStoreProvider,
};
use punch_support::server::state::AppState;
use punch_support::session::InMemorySessionStore;
use punch_support::types::{ChatMessage, FaqRecord, IndexedDocument};
use punch_support::SupportConfig;

const DIMENSIONS: usize = 64;

/// Bag-of-words embedder: each lowercase word bumps one hashed bucket
pub struct HashEmbedder;

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0; DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % DIMENSIONS as u64) as usize] += 1.0;
        }
        Ok(vector)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// Completion fake that replies with the last user message and records every prompt
#[derive(Default)]
pub struct EchoLlm {
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl EchoLlm {
    pub fn last_prompt(&self) -> Vec<ChatMessage> {
        self.prompts.lock().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletionProvider for EchoLlm {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        assert_eq!(temperature, 0.6);
        self.prompts.lock().push(messages.to_vec());
        Ok(messages
            .last()
            .map(|m| m.content().to_string())
            .unwrap_or_default())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }
}

/// Completion fake that always fails
pub struct FailingLlm;

#[async_trait]
impl ChatCompletionProvider for FailingLlm {
    async fn complete(&self, _messages: &[ChatMessage], _temperature: f32) -> Result<String> {
        Err(Error::completion("rate limit exceeded"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn model(&self) -> &str {
        "none"
    }
}

/// Vector store that is unreachable
pub struct UnreachableStore;

#[async_trait]
impl VectorStoreProvider for UnreachableStore {
    async fn add(&self, _documents: &[IndexedDocument]) -> Result<()> {
        Err(Error::vector_db("connection refused"))
    }

    async fn query(&self, _text: &str, _k: usize) -> Result<Vec<VectorMatch>> {
        Err(Error::vector_db("connection refused"))
    }

    async fn count(&self) -> Result<usize> {
        Err(Error::vector_db("connection refused"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

pub fn memory_store() -> Arc<InMemoryCollection> {
    Arc::new(InMemoryCollection::new("faq_embeddings", Arc::new(HashEmbedder)))
}

pub fn sample_records() -> Vec<FaqRecord> {
    vec![
        FaqRecord::qa(
            "How do I reset my password?",
            "Go to Settings > Security > Reset Password.",
        ),
        FaqRecord {
            text: "Refunds are processed within 5 business days.".to_string(),
            section: Some("Billing".to_string()),
            kind: Some("policy".to_string()),
            ..Default::default()
        },
        FaqRecord::qa("Do you ship internationally?", "Yes, to over 40 countries."),
    ]
}

/// Write records to a temporary JSON corpus file
pub fn corpus_file(records: &[FaqRecord]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(records).unwrap().as_bytes())
        .unwrap();
    file
}

/// Config pointing at `corpus`
pub fn config_for(corpus: &tempfile::NamedTempFile) -> SupportConfig {
    let mut config = SupportConfig::default();
    config.corpus.path = corpus.path().to_path_buf();
    config
}

/// State over an in-memory collection, a fresh session store and the given LLM
pub fn state_with(config: SupportConfig, llm: Arc<dyn ChatCompletionProvider>) -> AppState {
    AppState::from_parts(
        config,
        memory_store(),
        llm,
        Arc::new(InMemorySessionStore::new()),
    )
}
