pub mod config;
pub mod embedding;
pub mod llm;
pub mod loader;
pub mod vector_store;

pub use config::{Config, EmbeddingConfig, LlmConfig, RetrievalConfig, ServerConfig};
pub use embedding::TextEmbedding;
pub use llm::GroqLlm;
pub use loader::GoogleDocLoader;
pub use vector_store::InMemoryVectorIndex;
