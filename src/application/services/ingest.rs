use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::RetrievalService;
use crate::domain::{chunk_words, ports::DocumentLoader, Document, DomainError};

pub struct IngestOutcome {
    pub document: Document,
    pub chunk_count: usize,
}

/// Fetches a document, chunks it, and rebuilds the retrieval index.
///
/// The previous index survives a failed fetch: nothing is replaced until the
/// new document has been loaded and chunked.
pub struct IngestService {
    loader: Arc<dyn DocumentLoader>,
    retrieval: Arc<RetrievalService>,
    window_words: usize,
    overlap_words: usize,
}

impl IngestService {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        retrieval: Arc<RetrievalService>,
        window_words: usize,
        overlap_words: usize,
    ) -> Self {
        Self {
            loader,
            retrieval,
            window_words,
            overlap_words,
        }
    }

    #[instrument(skip(self))]
    pub async fn ingest(&self, url: &str) -> Result<IngestOutcome, DomainError> {
        let fetched = self.loader.fetch(url).await?;
        let word_count = fetched.word_count();

        let mut document = Document::new(url, word_count);
        if let Some(title) = fetched.title {
            document = document.with_title(title);
        }

        let chunks = chunk_words(document.id, &fetched.text, self.window_words, self.overlap_words);
        self.retrieval.rebuild(&chunks).await?;

        info!(
            document_id = %document.id,
            words = word_count,
            chunks = chunks.len(),
            "document indexed"
        );

        Ok(IngestOutcome {
            document,
            chunk_count: chunks.len(),
        })
    }
}
