//! Configuration for the support bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the OpenAI API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PUNCH_SUPPORT_PORT";
/// Environment variable overriding the FAQ corpus path
pub const CORPUS_ENV: &str = "PUNCH_SUPPORT_CORPUS";

/// Main support bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// OpenAI configuration (completions and embeddings)
    pub openai: OpenAiConfig,
    /// Vector database configuration
    pub vector_db: VectorDbConfig,
    /// FAQ corpus configuration
    pub corpus: CorpusConfig,
    /// Conversation configuration
    pub chat: ChatConfig,
}

impl SupportConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.openai.api_key = Some(key);
            }
        }

        if let Ok(port) = std::env::var(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", PORT_ENV, port),
            }
        }

        if let Ok(corpus) = std::env::var(CORPUS_ENV) {
            self.corpus.path = PathBuf::from(corpus);
        }
    }

    /// Ensure everything needed to reach the external services is present
    pub fn validate(&self) -> Result<()> {
        if self.openai.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Config(format!(
                "OpenAI API key not found (set {})",
                API_KEY_ENV
            )));
        }
        if self.chat.top_k == 0 {
            return Err(Error::Config("chat.top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS (any origin, method and header)
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// OpenAI API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL
    pub base_url: String,
    /// API key (normally taken from the environment)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Chat-completion model name
    pub chat_model: String,
    /// Embedding model name
    pub embed_model: String,
    /// Sampling temperature for replies
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            chat_model: "gpt-4o-mini".to_string(),
            embed_model: "text-embedding-3-small".to_string(),
            temperature: 0.6,
            timeout_secs: 60,
        }
    }
}

/// Vector database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorDbConfig {
    /// Backend holding the FAQ collection
    pub backend: VectorBackend,
    /// Collection name
    pub collection: String,
    /// Chroma server URL (chroma backend only)
    pub chroma_url: String,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            backend: VectorBackend::Memory,
            collection: "faq_embeddings".to_string(),
            chroma_url: "http://localhost:8001".to_string(),
        }
    }
}

/// Vector backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VectorBackend {
    /// In-process collection, lives as long as the server
    #[default]
    Memory,
    /// Remote Chroma server
    Chroma,
}

/// FAQ corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// JSON file holding the FAQ records
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("faq_data.json"),
        }
    }
}

/// Conversation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of trailing turns forwarded to the model
    pub history_window: usize,
    /// Number of FAQ matches retrieved per question
    pub top_k: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: 5,
            top_k: 3,
        }
    }
}
