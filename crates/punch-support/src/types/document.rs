//! FAQ source records and the documents indexed from them

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the FAQ corpus as found on disk
///
/// Every field is optional in practice: records are read leniently so that a
/// malformed entry still yields a document instead of failing the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    /// Question this entry answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Answer body
    #[serde(default)]
    pub text: String,
    /// Corpus section (e.g. "Billing")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Entry type (e.g. "faq", "policy")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl FaqRecord {
    /// Create a question/answer record
    pub fn qa(question: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Read a record from arbitrary JSON, keeping only string-valued fields
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            question: field("question"),
            text: field("text").unwrap_or_default(),
            section: field("section"),
            kind: field("type"),
        }
    }
}

/// Metadata stored next to each indexed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Section, empty when the record had none
    #[serde(default)]
    pub section: String,
    /// Entry type, empty when the record had none
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Source question, empty when the record had none
    #[serde(default)]
    pub question: String,
}

/// A prepared FAQ document ready to be embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    /// Unique document ID, fresh for every ingestion run
    pub id: String,
    /// Text that gets embedded and returned as the answer
    pub text: String,
    /// Metadata carried through retrieval
    pub metadata: DocumentMetadata,
}
