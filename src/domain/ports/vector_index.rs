use crate::domain::{errors::DomainError, DocumentChunk, Embedding, SearchResult};
use async_trait::async_trait;

/// Nearest-neighbor index over the chunks of the current document.
///
/// The index is rebuilt wholesale on ingest; there is no incremental
/// update path.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Replaces the entire index contents with the given entries.
    async fn replace(&self, entries: Vec<(DocumentChunk, Embedding)>) -> Result<(), DomainError>;

    /// Returns the `top_k` nearest chunks, best first. Empty when no
    /// document is indexed.
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError>;

    async fn is_empty(&self) -> Result<bool, DomainError>;
}
