mod document_loader;
mod embedding;
mod llm;
mod vector_index;

pub use document_loader::DocumentLoader;
pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use vector_index::VectorIndex;
