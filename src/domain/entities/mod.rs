mod conversation;
mod document;
mod embedding;

pub use conversation::{Conversation, Message, MessageRole};
pub use document::{chunk_words, Document, DocumentChunk, FetchedDocument, SearchResult};
pub use embedding::Embedding;
