//! Error types for the support bot

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::Path;
use thiserror::Error;

/// Body returned for any failed request
pub const GENERIC_FAILURE: &str = "Internal Server Error";

/// Result type alias for support bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Support bot errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// FAQ corpus could not be read or decoded
    #[error("Failed to load FAQ corpus '{path}': {message}")]
    Corpus { path: String, message: String },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector store error (retrieval or ingestion)
    #[error("Vector database error: {0}")]
    VectorDb(String),

    /// Chat-completion error
    #[error("Completion error: {0}")]
    Completion(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a corpus error
    pub fn corpus(path: &Path, message: impl Into<String>) -> Self {
        Self::Corpus {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector db error
    pub fn vector_db(message: impl Into<String>) -> Self {
        Self::VectorDb(message.into())
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Details stay in the log; callers only learn that the request failed
        tracing::error!("Request failed: {}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
    }
}
