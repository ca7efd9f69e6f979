use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::application::IngestOutcome;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub id: Uuid,
    pub source_url: String,
    pub title: Option<String>,
    pub word_count: usize,
    pub chunk_count: usize,
    pub ingested_at: DateTime<Utc>,
    pub status: String,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        Self {
            id: outcome.document.id,
            source_url: outcome.document.source_url,
            title: outcome.document.title,
            word_count: outcome.document.word_count,
            chunk_count: outcome.chunk_count,
            ingested_at: outcome.document.ingested_at,
            status: "Document ingested successfully.".to_string(),
        }
    }
}

/// Ingests the document behind the given URL, replacing the previous one.
/// The conversation buffer and the remembered topic are reset with it.
pub async fn ingest_document(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let outcome = state.ingest_service.ingest(&request.url).await?;
    state.chat_service.reset()?;

    Ok(Json(IngestResponse::from(outcome)))
}
