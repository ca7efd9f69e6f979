mod chat;
mod ingest;
mod retrieval;

pub use chat::{ChatPrompts, ChatService};
pub use ingest::{IngestOutcome, IngestService};
pub use retrieval::RetrievalService;
