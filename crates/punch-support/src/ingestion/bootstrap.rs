//! Startup ingestion: populate the FAQ index exactly once

use std::path::Path;

use crate::error::Result;
use crate::retrieval::FaqIndex;

use super::preparer::{load_corpus, prepare_documents};

/// What the bootstrapper did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionOutcome {
    /// The corpus was loaded and this many documents were added
    Ingested(usize),
    /// The index already held this many documents; nothing was added
    AlreadyPopulated(usize),
}

/// Ingest the corpus at `corpus_path` unless the index already has data
///
/// The population check and the ingest run under the index's ingestion lock,
/// so concurrent callers cannot both see an empty index.
pub async fn ensure_ingested(index: &FaqIndex, corpus_path: &Path) -> Result<IngestionOutcome> {
    let mut ingested = index.lock_ingestion().await;

    let existing = index.count().await?;
    if *ingested || existing > 0 {
        *ingested = true;
        tracing::info!("FAQ index already has {} entries", existing);
        return Ok(IngestionOutcome::AlreadyPopulated(existing));
    }

    tracing::info!("FAQ index is empty, loading corpus from {}", corpus_path.display());
    let records = load_corpus(corpus_path).await?;
    let documents = prepare_documents(&records);
    let added = index.ingest(&documents).await?;

    *ingested = true;
    tracing::info!("Added {} FAQ entries to the index", added);

    Ok(IngestionOutcome::Ingested(added))
}
