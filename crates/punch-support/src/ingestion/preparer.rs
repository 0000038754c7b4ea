//! Turns FAQ records into indexable documents

use std::path::Path;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{DocumentMetadata, FaqRecord, IndexedDocument};

/// Section label used in document text when a record has none
pub const DEFAULT_SECTION: &str = "General";

/// Load the FAQ corpus (a JSON array of records)
pub async fn load_corpus(path: &Path) -> Result<Vec<FaqRecord>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::corpus(path, e.to_string()))?;

    parse_corpus(&content).map_err(|message| Error::corpus(path, message))
}

/// Parse corpus JSON; individual records are read leniently
pub fn parse_corpus(content: &str) -> std::result::Result<Vec<FaqRecord>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    match value {
        serde_json::Value::Array(items) => Ok(items.iter().map(FaqRecord::from_value).collect()),
        other => Err(format!("expected a JSON array of records, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Render the text that gets embedded for a record
pub fn document_text(record: &FaqRecord) -> String {
    match non_empty(&record.question) {
        Some(question) => format!("Q: {}\nA: {}", question, record.text),
        None => format!(
            "{}: {}",
            non_empty(&record.section).unwrap_or(DEFAULT_SECTION),
            record.text
        ),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Prepare a single record with a fresh ID
pub fn prepare_document(record: &FaqRecord) -> IndexedDocument {
    IndexedDocument {
        id: Uuid::new_v4().to_string(),
        text: document_text(record),
        metadata: DocumentMetadata {
            section: record.section.clone().unwrap_or_default(),
            kind: record.kind.clone().unwrap_or_default(),
            question: record.question.clone().unwrap_or_default(),
        },
    }
}

/// Prepare one document per record
pub fn prepare_documents(records: &[FaqRecord]) -> Vec<IndexedDocument> {
    records.iter().map(prepare_document).collect()
}
