use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, VectorIndex},
    DocumentChunk, DomainError, SearchResult,
};

/// Embedding + nearest-neighbor search over the current document.
///
/// `rebuild` replaces the whole index; there is exactly one document's worth
/// of chunks indexed at any time.
pub struct RetrievalService {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
}

impl RetrievalService {
    pub fn new(embedding: Arc<dyn EmbeddingService>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedding, index }
    }

    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn rebuild(&self, chunks: &[DocumentChunk]) -> Result<(), DomainError> {
        if chunks.is_empty() {
            return self.index.replace(Vec::new()).await;
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(DomainError::internal(format!(
                "embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let entries = chunks.iter().cloned().zip(embeddings).collect();
        self.index.replace(entries).await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        self.index.search(&embedding, top_k).await
    }

    /// Whether any document is currently indexed.
    pub async fn is_ready(&self) -> Result<bool, DomainError> {
        Ok(!self.index.is_empty().await?)
    }
}
