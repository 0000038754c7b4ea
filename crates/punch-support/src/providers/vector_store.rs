//! Vector store provider trait for storing and searching FAQ documents

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{DocumentMetadata, IndexedDocument};

/// Search result from vector store
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    /// Document ID
    pub id: String,
    /// Stored document text
    pub text: String,
    /// Stored metadata, if the backend returned any
    pub metadata: Option<DocumentMetadata>,
    /// Distance to the query (lower is closer)
    pub distance: f32,
}

/// Trait for a named similarity-search collection
///
/// Implementations embed document text themselves, so callers deal in text only.
///
/// Implementations:
/// - `InMemoryCollection`: process-lifetime collection with cosine distance
/// - `ChromaCollection`: remote Chroma server
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert a batch of documents; either all are stored or none are
    async fn add(&self, documents: &[IndexedDocument]) -> Result<()>;

    /// Return up to `k` documents nearest to `text`, closest first
    async fn query(&self, text: &str, k: usize) -> Result<Vec<VectorMatch>>;

    /// Get total number of documents stored
    async fn count(&self) -> Result<usize>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
