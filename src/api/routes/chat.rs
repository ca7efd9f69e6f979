use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::Message;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub messages: Vec<Message>,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply = state.chat_service.respond(&request.query).await?;
    let messages = state.chat_service.transcript()?;

    Ok(Json(ChatResponse { reply, messages }))
}

pub async fn get_conversation(
    State(state): State<AppState>,
) -> Result<Json<ConversationResponse>, ApiError> {
    Ok(Json(ConversationResponse {
        messages: state.chat_service.transcript()?,
    }))
}
