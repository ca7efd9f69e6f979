use std::net::SocketAddr;
use std::sync::Arc;

use doc_chat::api::{create_router, AppState};
use doc_chat::application::{ChatService, IngestService, RetrievalService};
use doc_chat::infrastructure::{
    Config, GoogleDocLoader, GroqLlm, InMemoryVectorIndex, TextEmbedding,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let embedding = Arc::new(TextEmbedding::from_config(&config.embedding));
    let index = Arc::new(InMemoryVectorIndex::new());
    let retrieval = Arc::new(RetrievalService::new(embedding, index));

    let loader = Arc::new(GoogleDocLoader::new(config.retrieval.min_document_words)?);
    let ingest = Arc::new(IngestService::new(
        loader,
        retrieval.clone(),
        config.retrieval.window_words,
        config.retrieval.overlap_words,
    ));

    let llm = Arc::new(GroqLlm::from_config(&config.llm));
    let chat = Arc::new(ChatService::new(
        retrieval.clone(),
        llm,
        config.prompts.clone(),
        config.retrieval.top_k,
        config.retrieval.history_limit,
    ));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState::new(ingest, chat, retrieval, config);
    let app = create_router(state);

    info!("server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
