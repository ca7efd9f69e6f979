//! Application layer - use cases over the domain ports.
//!
//! Services orchestrate the ports (loader, embeddings, index, model) and own
//! the session state; they never depend on concrete adapters.

pub mod services;

pub use services::{ChatPrompts, ChatService, IngestOutcome, IngestService, RetrievalService};
