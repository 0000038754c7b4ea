//! FAQ index: ingestion and nearest-neighbour lookup over a vector store

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::Result;
use crate::providers::{VectorMatch, VectorStoreProvider};
use crate::types::{IndexedDocument, RetrievalResult, MISSING_METADATA};

/// Gateway to the FAQ collection
pub struct FaqIndex {
    store: Arc<dyn VectorStoreProvider>,
    /// Set once a corpus load has completed in this process.
    /// Held across the population check and the ingest call.
    ingestion: Mutex<bool>,
}

impl FaqIndex {
    /// Wrap a vector store
    pub fn new(store: Arc<dyn VectorStoreProvider>) -> Self {
        Self {
            store,
            ingestion: Mutex::new(false),
        }
    }

    /// Insert documents in one batch. Unguarded: repeated calls add duplicates.
    pub async fn ingest(&self, documents: &[IndexedDocument]) -> Result<usize> {
        self.store.add(documents).await?;
        tracing::debug!("Stored {} documents in {}", documents.len(), self.store.name());
        Ok(documents.len())
    }

    /// Whether the backing store (and its embedder) can serve requests
    pub async fn health_check(&self) -> Result<bool> {
        self.store.health_check().await
    }

    /// Backend name for logging
    pub fn backend(&self) -> &str {
        self.store.name()
    }

    /// Number of indexed documents
    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Take the ingestion lock; the guarded flag records a completed ingestion
    pub async fn lock_ingestion(&self) -> MutexGuard<'_, bool> {
        self.ingestion.lock().await
    }

    /// Top-`k` matches for `text`, closest first
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<RetrievalResult>> {
        let matches = self.store.query(text, k).await?;

        let results: Vec<RetrievalResult> = matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| to_result(i + 1, m))
            .collect();

        tracing::debug!("Top matches for \"{}\":", text);
        for r in &results {
            tracing::debug!(
                "  #{} section={} type={} distance={:.4}",
                r.match_rank,
                r.section,
                r.kind,
                r.distance
            );
        }

        Ok(results)
    }
}

fn to_result(rank: usize, m: VectorMatch) -> RetrievalResult {
    let (section, kind) = match m.metadata {
        Some(meta) => (meta.section, meta.kind),
        None => (MISSING_METADATA.to_string(), MISSING_METADATA.to_string()),
    };

    RetrievalResult {
        match_rank: rank,
        answer: m.text,
        section,
        kind,
        distance: m.distance,
    }
}
