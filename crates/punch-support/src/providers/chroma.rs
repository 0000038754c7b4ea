//! Chroma server collection
//!
//! Uses Chroma's REST API with embeddings computed on our side, so the same
//! embedding model serves both the in-process and the remote backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::{DocumentMetadata, IndexedDocument, MISSING_METADATA};

use super::embedding::EmbeddingProvider;
use super::vector_store::{VectorMatch, VectorStoreProvider};

/// Collection stored on a Chroma server
pub struct ChromaCollection {
    client: Client,
    base_url: String,
    name: String,
    embedder: Arc<dyn EmbeddingProvider>,
    /// Server-side collection ID, resolved on first use
    collection_id: OnceCell<String>,
}

#[derive(Serialize)]
struct GetOrCreateRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Serialize)]
struct AddRequest<'a> {
    ids: Vec<&'a str>,
    embeddings: Vec<Vec<f32>>,
    documents: Vec<&'a str>,
    metadatas: Vec<&'a DocumentMetadata>,
}

#[derive(Serialize)]
struct QueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: [&'static str; 3],
}

/// Stored metadata as Chroma returns it; any key may be absent
#[derive(Deserialize)]
struct ChromaMetadata {
    section: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
}

impl From<ChromaMetadata> for DocumentMetadata {
    fn from(meta: ChromaMetadata) -> Self {
        let or_missing = |v: Option<String>| v.unwrap_or_else(|| MISSING_METADATA.to_string());
        Self {
            section: or_missing(meta.section),
            kind: or_missing(meta.kind),
            question: meta.question.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<ChromaMetadata>>>>,
    #[serde(default)]
    distances: Option<Vec<Vec<f32>>>,
}

impl ChromaCollection {
    /// Create a collection handle; nothing is sent until first use
    pub fn new(config: &VectorDbConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.chroma_url.trim_end_matches('/').to_string(),
            name: config.collection.clone(),
            embedder,
            collection_id: OnceCell::new(),
        })
    }

    async fn collection_id(&self) -> Result<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                let url = format!("{}/api/v1/collections", self.base_url);
                let response = self
                    .client
                    .post(&url)
                    .json(&GetOrCreateRequest {
                        name: &self.name,
                        get_or_create: true,
                    })
                    .send()
                    .await
                    .map_err(|e| Error::vector_db(format!("Chroma unreachable: {}", e)))?;

                let collection: CollectionResponse = Self::check(response).await?.json().await?;
                tracing::info!("Using Chroma collection '{}' ({})", self.name, collection.id);
                Ok::<_, Error>(collection.id)
            })
            .await?;

        Ok(id.as_str())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::vector_db(format!("Chroma error: HTTP {} - {}", status, body)))
    }
}

#[async_trait]
impl VectorStoreProvider for ChromaCollection {
    async fn add(&self, documents: &[IndexedDocument]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let request = AddRequest {
            ids: documents.iter().map(|d| d.id.as_str()).collect(),
            embeddings,
            documents: documents.iter().map(|d| d.text.as_str()).collect(),
            metadatas: documents.iter().map(|d| &d.metadata).collect(),
        };

        let url = format!("{}/api/v1/collections/{}/add", self.base_url, self.collection_id().await?);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Chroma add failed: {}", e)))?;
        Self::check(response).await?;

        Ok(())
    }

    async fn query(&self, text: &str, k: usize) -> Result<Vec<VectorMatch>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(text).await?;
        let request = QueryRequest {
            query_embeddings: vec![embedding],
            n_results: k,
            include: ["documents", "metadatas", "distances"],
        };

        let url = format!("{}/api/v1/collections/{}/query", self.base_url, self.collection_id().await?);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Chroma query failed: {}", e)))?;

        let result: QueryResponse = Self::check(response).await?.json().await?;
        Ok(flatten_query(result))
    }

    async fn count(&self) -> Result<usize> {
        let url = format!("{}/api/v1/collections/{}/count", self.base_url, self.collection_id().await?);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::vector_db(format!("Chroma count failed: {}", e)))?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/v1/heartbeat", self.base_url);
        let alive = match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Chroma heartbeat failed: {}", e);
                false
            }
        };

        Ok(alive && self.embedder.health_check().await?)
    }

    fn name(&self) -> &str {
        "chroma"
    }
}

/// Take the first (only) query's columns and zip them into matches
fn flatten_query(result: QueryResponse) -> Vec<VectorMatch> {
    let ids = result.ids.into_iter().next().unwrap_or_default();
    let mut documents = result.documents.and_then(|d| d.into_iter().next()).unwrap_or_default().into_iter();
    let mut metadatas = result.metadatas.and_then(|m| m.into_iter().next()).unwrap_or_default().into_iter();
    let mut distances = result.distances.and_then(|d| d.into_iter().next()).unwrap_or_default().into_iter();

    ids.into_iter()
        .map(|id| VectorMatch {
            id,
            text: documents.next().flatten().unwrap_or_default(),
            metadata: metadatas.next().flatten().map(DocumentMetadata::from),
            distance: distances.next().unwrap_or(f32::MAX),
        })
        .collect()
}
