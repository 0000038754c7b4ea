//! FAQ corpus ingestion

pub mod bootstrap;
pub mod preparer;

pub use bootstrap::{ensure_ingested, IngestionOutcome};
pub use preparer::{load_corpus, prepare_document, prepare_documents};
