use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single ingested document. A new ingest replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub source_url: String,
    pub title: Option<String>,
    pub word_count: usize,
    pub ingested_at: DateTime<Utc>,
}

impl Document {
    pub fn new(source_url: impl Into<String>, word_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            title: None,
            word_count,
            ingested_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Raw text pulled out of a fetched document, before chunking.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub title: Option<String>,
    pub text: String,
}

impl FetchedDocument {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
    pub start_word: usize,
}

impl DocumentChunk {
    pub fn new(
        document_id: Uuid,
        content: impl Into<String>,
        chunk_index: usize,
        start_word: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content: content.into(),
            chunk_index,
            start_word,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

/// Splits text into overlapping fixed-size word windows.
///
/// Windows advance by `window - overlap` words, so consecutive chunks share
/// `overlap` words at their boundary. Every word of the input lands in at
/// least one chunk. The step is clamped to 1 when `overlap >= window`.
pub fn chunk_words(
    document_id: Uuid,
    text: &str,
    window: usize,
    overlap: usize,
) -> Vec<DocumentChunk> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || window == 0 {
        return Vec::new();
    }

    let step = window.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + window).min(words.len());
        let content = words[start..end].join(" ");
        chunks.push(DocumentChunk::new(document_id, content, chunks.len(), start));
        start += step;
    }

    chunks
}
