//! Retrieval results handed to the conversation layer

use serde::{Deserialize, Serialize};

/// Placeholder for metadata the store did not return
pub const MISSING_METADATA: &str = "N/A";

/// One FAQ match for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// 1-based rank, closest first
    pub match_rank: usize,
    /// Indexed document text
    pub answer: String,
    /// Section metadata ("N/A" when the store returned none)
    pub section: String,
    /// Type metadata ("N/A" when the store returned none)
    #[serde(rename = "type")]
    pub kind: String,
    /// Distance to the query, lower is closer
    pub distance: f32,
}
