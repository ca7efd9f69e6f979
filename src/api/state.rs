use std::sync::Arc;

use crate::application::{ChatService, IngestService, RetrievalService};
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<IngestService>,
    pub chat_service: Arc<ChatService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        ingest_service: Arc<IngestService>,
        chat_service: Arc<ChatService>,
        retrieval_service: Arc<RetrievalService>,
        config: Config,
    ) -> Self {
        Self {
            ingest_service,
            chat_service,
            retrieval_service,
            config: Arc::new(config),
        }
    }
}
