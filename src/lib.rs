//! Single-document question-answering chat service.
//!
//! One Google Doc is ingested at a time: its text is chunked into
//! overlapping word windows, embedded, and indexed in memory. Chat turns
//! retrieve the nearest chunks and prompt a completion model constrained to
//! that context.
//!
//! - [`domain`] - entities, chunking and conversation heuristics, ports
//! - [`application`] - ingest, retrieval and chat services over the ports
//! - [`infrastructure`] - loader, embedding, model and index adapters, config
//! - [`api`] - axum router, handlers, error mapping

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
