use serde::Deserialize;

use crate::application::ChatPrompts;
use crate::domain::{DomainError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub cors_allowed_origins: Vec<String>,
    pub prompts: ChatPrompts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunk window size in words.
    pub window_words: usize,
    /// Words shared between consecutive chunks.
    pub overlap_words: usize,
    pub top_k: usize,
    /// Retained turns; the transcript holds twice this many messages.
    pub history_limit: usize,
    /// Documents below this word count are rejected on ingest.
    pub min_document_words: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".into(),
            temperature: 0.2,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".into(),
            dimension: 1536,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            window_words: 500,
            overlap_words: 100,
            top_k: 5,
            history_limit: 5,
            min_document_words: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            embedding: EmbeddingConfig::default(),
            retrieval: RetrievalConfig::default(),
            cors_allowed_origins: vec!["*".into()],
            prompts: ChatPrompts::default(),
        }
    }
}

impl Config {
    /// Builds the config from environment variables over the defaults.
    /// `PROMPTS_PATH` points at an optional YAML file overriding the canned
    /// replies and style directives.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| DomainError::validation(format!("invalid SERVER_PORT: {port}")))?;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins =
                origins.split(',').map(|o| o.trim().to_string()).collect();
        }
        if let Ok(path) = std::env::var("PROMPTS_PATH") {
            config.prompts = load_prompts(&path)?;
        }

        Ok(config)
    }
}

fn load_prompts(path: &str) -> Result<ChatPrompts> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::validation(format!("cannot read prompts file {path}: {e}")))?;
    serde_yaml::from_str(&raw)
        .map_err(|e| DomainError::validation(format!("invalid prompts file {path}: {e}")))
}
