//! Application state for the support server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{SupportConfig, VectorBackend};
use crate::conversation::ConversationOrchestrator;
use crate::error::Result;
use crate::ingestion::{ensure_ingested, IngestionOutcome};
use crate::providers::{
    ChatCompletionProvider, ChromaCollection, EmbeddingProvider, InMemoryCollection, OpenAiChat,
    OpenAiClient, OpenAiEmbedder, VectorStoreProvider,
};
use crate::retrieval::FaqIndex;
use crate::session::{InMemorySessionStore, SessionStore};

/// Result of probing upstream services at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderHealth {
    pub vector_store: bool,
    pub completion: bool,
}

impl ProviderHealth {
    pub fn all_healthy(&self) -> bool {
        self.vector_store && self.completion
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: SupportConfig,
    /// FAQ index (vector store gateway)
    index: Arc<FaqIndex>,
    /// Chat-completion backend, kept for health checks
    llm: Arc<dyn ChatCompletionProvider>,
    /// Conversation orchestrator
    conversation: ConversationOrchestrator,
    /// Ready state, set once the index is populated
    ready: RwLock<bool>,
}

impl AppState {
    /// Create application state with OpenAI providers and the configured vector backend
    pub async fn new(config: SupportConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing support bot state (vector backend: {:?})...", config.vector_db.backend);

        let openai = Arc::new(OpenAiClient::new(&config.openai)?);
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbedder::from_client(Arc::clone(&openai)));
        let llm: Arc<dyn ChatCompletionProvider> = Arc::new(OpenAiChat::from_client(openai));
        tracing::info!(
            "OpenAI client initialized (chat: {}, embeddings: {})",
            config.openai.chat_model,
            config.openai.embed_model
        );

        let store: Arc<dyn VectorStoreProvider> = match config.vector_db.backend {
            VectorBackend::Memory => {
                tracing::info!("Using in-memory collection '{}'", config.vector_db.collection);
                Arc::new(InMemoryCollection::new(config.vector_db.collection.clone(), embedder))
            }
            VectorBackend::Chroma => {
                tracing::info!(
                    "Using Chroma collection '{}' at {}",
                    config.vector_db.collection,
                    config.vector_db.chroma_url
                );
                Arc::new(ChromaCollection::new(&config.vector_db, embedder)?)
            }
        };

        Ok(Self::from_parts(
            config,
            store,
            llm,
            Arc::new(InMemorySessionStore::new()),
        ))
    }

    /// Assemble state from already-built providers
    pub fn from_parts(
        config: SupportConfig,
        store: Arc<dyn VectorStoreProvider>,
        llm: Arc<dyn ChatCompletionProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let index = Arc::new(FaqIndex::new(store));
        let conversation = ConversationOrchestrator::new(
            Arc::clone(&index),
            Arc::clone(&llm),
            sessions,
            &config.chat,
            config.openai.temperature,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                index,
                llm,
                conversation,
                ready: RwLock::new(false),
            }),
        }
    }

    /// Populate the index from the configured corpus and mark the state ready
    pub async fn bootstrap(&self) -> Result<IngestionOutcome> {
        let outcome = ensure_ingested(&self.inner.index, &self.inner.config.corpus.path).await?;
        self.set_ready(true);
        Ok(outcome)
    }

    /// Probe the vector store and the completion backend
    ///
    /// Failures are reported, not fatal: the bootstrapper decides whether
    /// the server can start.
    pub async fn check_providers(&self) -> ProviderHealth {
        let vector_store = report(
            &format!("Vector store ({})", self.inner.index.backend()),
            self.inner.index.health_check().await,
        );
        let completion = report(
            &format!("Chat completion ({})", self.inner.llm.model()),
            self.inner.llm.health_check().await,
        );

        ProviderHealth {
            vector_store,
            completion,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &SupportConfig {
        &self.inner.config
    }

    /// Get FAQ index
    pub fn index(&self) -> &Arc<FaqIndex> {
        &self.inner.index
    }

    /// Get conversation orchestrator
    pub fn conversation(&self) -> &ConversationOrchestrator {
        &self.inner.conversation
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}

fn report(what: &str, result: Result<bool>) -> bool {
    match result {
        Ok(true) => {
            tracing::info!("{} is available", what);
            true
        }
        Ok(false) => {
            tracing::warn!("{} is not available", what);
            false
        }
        Err(e) => {
            tracing::warn!("{} health check failed: {}", what, e);
            false
        }
    }
}
