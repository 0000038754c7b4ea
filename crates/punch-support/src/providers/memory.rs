//! In-process vector collection
//!
//! Holds documents and their embeddings for the lifetime of the server.
//! Nothing is written to disk; a restart starts from an empty collection.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::IndexedDocument;

use super::embedding::EmbeddingProvider;
use super::vector_store::{VectorMatch, VectorStoreProvider};

struct StoredDocument {
    document: IndexedDocument,
    embedding: Vec<f32>,
}

/// Named collection searched by cosine distance
pub struct InMemoryCollection {
    name: String,
    embedder: Arc<dyn EmbeddingProvider>,
    entries: RwLock<Vec<StoredDocument>>,
}

impl InMemoryCollection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            name: name.into(),
            embedder,
            entries: RwLock::new(Vec::new()),
        }
    }
}

/// First id in `documents` that is already stored or repeated within the batch
fn duplicate_id<'a>(entries: &[StoredDocument], documents: &'a [IndexedDocument]) -> Option<&'a str> {
    let existing: HashSet<&str> = entries.iter().map(|e| e.document.id.as_str()).collect();
    let mut batch = HashSet::new();
    documents
        .iter()
        .map(|d| d.id.as_str())
        .find(|id| existing.contains(id) || !batch.insert(*id))
}

/// Cosine distance (`1 - cosine similarity`), 1.0 when either vector is zero
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStoreProvider for InMemoryCollection {
    async fn add(&self, documents: &[IndexedDocument]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        if let Some(id) = duplicate_id(&self.entries.read(), documents) {
            return Err(Error::vector_db(format!("Duplicate document id: {}", id)));
        }

        // Embed everything before touching the collection
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != documents.len() {
            return Err(Error::vector_db(format!(
                "Embedder returned {} vectors for {} documents",
                embeddings.len(),
                documents.len()
            )));
        }

        // The read lock was released while embedding; another add may have landed
        let mut entries = self.entries.write();
        if let Some(id) = duplicate_id(&entries, documents) {
            return Err(Error::vector_db(format!("Duplicate document id: {}", id)));
        }
        entries.extend(
            documents
                .iter()
                .cloned()
                .zip(embeddings)
                .map(|(document, embedding)| StoredDocument { document, embedding }),
        );

        tracing::debug!("Collection '{}' now holds {} documents", self.name, entries.len());
        Ok(())
    }

    async fn query(&self, text: &str, k: usize) -> Result<Vec<VectorMatch>> {
        if k == 0 || self.entries.read().is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(text).await?;

        let entries = self.entries.read();
        let mut matches: Vec<VectorMatch> = entries
            .iter()
            .map(|entry| VectorMatch {
                id: entry.document.id.clone(),
                text: entry.document.text.clone(),
                metadata: Some(entry.document.metadata.clone()),
                distance: cosine_distance(&query_embedding, &entry.embedding),
            })
            .collect();

        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(k);

        Ok(matches)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    async fn health_check(&self) -> Result<bool> {
        self.embedder.health_check().await
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentMetadata;

    /// Embeds text as counts of a few keywords
    struct KeywordEmbedder;

    /// Keyword embedder that waits at a barrier, so two adds embed at the same time
    struct GatedEmbedder {
        gate: tokio::sync::Barrier,
    }

    #[async_trait]
    impl EmbeddingProvider for GatedEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            KeywordEmbedder.embed(text).await
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.gate.wait().await;
            KeywordEmbedder.embed_batch(texts).await
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn name(&self) -> &str {
            "gated"
        }
    }

    #[async_trait]
    impl EmbeddingProvider for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let lower = text.to_lowercase();
            Ok(["password", "refund", "shipping"]
                .iter()
                .map(|k| lower.matches(k).count() as f32)
                .collect())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "keyword"
        }
    }

    fn doc(id: &str, text: &str) -> IndexedDocument {
        IndexedDocument {
            id: id.to_string(),
            text: text.to_string(),
            metadata: DocumentMetadata::default(),
        }
    }

    fn collection() -> InMemoryCollection {
        InMemoryCollection::new("faq_embeddings", Arc::new(KeywordEmbedder))
    }

    #[test]
    fn test_cosine_distance() {
        assert!(cosine_distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[tokio::test]
    async fn test_query_orders_closest_first() {
        let collection = collection();
        collection
            .add(&[
                doc("a", "Refund policy: refunds take 5 days."),
                doc("b", "Reset your password in Settings."),
                doc("c", "Shipping is free over $50."),
            ])
            .await
            .unwrap();

        let matches = collection.query("I forgot my password", 3).await.unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].id, "b");
        assert!(matches.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[tokio::test]
    async fn test_query_returns_fewer_than_k() {
        let collection = collection();
        collection.add(&[doc("a", "Refunds")]).await.unwrap();

        let matches = collection.query("refund", 3).await.unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_collection_query() {
        let matches = collection().query("anything", 3).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected_without_partial_insert() {
        let collection = collection();
        collection.add(&[doc("a", "Refunds")]).await.unwrap();

        let result = collection.add(&[doc("b", "Shipping"), doc("a", "Again")]).await;
        assert!(matches!(result, Err(Error::VectorDb(_))));
        assert_eq!(collection.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_with_same_id_store_one() {
        let collection = Arc::new(InMemoryCollection::new(
            "faq_embeddings",
            Arc::new(GatedEmbedder {
                gate: tokio::sync::Barrier::new(2),
            }),
        ));

        let first = {
            let collection = Arc::clone(&collection);
            tokio::spawn(async move { collection.add(&[doc("a", "Refunds")]).await })
        };
        let second = {
            let collection = Arc::clone(&collection);
            tokio::spawn(async move { collection.add(&[doc("a", "Shipping")]).await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(Error::VectorDb(_)))));
        assert_eq!(collection.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_health_follows_embedder() {
        assert!(collection().health_check().await.unwrap());

        let gated = InMemoryCollection::new(
            "faq_embeddings",
            Arc::new(GatedEmbedder {
                gate: tokio::sync::Barrier::new(1),
            }),
        );
        assert!(!gated.health_check().await.unwrap());
    }
}
