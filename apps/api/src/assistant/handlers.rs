use axum::{extract::State, Json};
use serde::Deserialize;

use crate::assistant::chat::{answer, ChatReply};
use crate::errors::AppError;
use crate::llm_client::Turn;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
}

/// POST /api/v1/chat
///
/// Model failures come back as a 200 reply flagged `is_error`; only an empty
/// message is rejected.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    // Snapshot the document so the lock is not held across the model call.
    let document = state.store.lock().await.current().clone();

    let reply = answer(
        state.llm.as_deref(),
        &state.config.chat_model,
        &document,
        &request.history,
        &request.message,
    )
    .await;

    Ok(Json(reply))
}
