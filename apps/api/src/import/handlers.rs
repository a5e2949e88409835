//! Axum route handlers for résumé import.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::import::parser::parse_resume;
use crate::import::pdf::{extract_text, is_pdf};
use crate::llm_client::{GenerativeModel, LlmError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub document: Value,
    pub edit_mode: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/import/resume
///
/// Multipart upload with a PDF in the `file` field. The parsed document
/// becomes the override.
pub async fn handle_import_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if !is_pdf(field.content_type(), field.file_name()) {
            return Err(AppError::Validation("Please upload a PDF file.".to_string()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some(bytes.to_vec());
    }

    let bytes = upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let text = extract_text(bytes).await?;
    import_text(&state, &text).await
}

/// POST /api/v1/import/text
pub async fn handle_import_text(
    State(state): State<AppState>,
    Json(request): Json<ImportTextRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    import_text(&state, &request.text).await
}

async fn import_text(state: &AppState, text: &str) -> Result<Json<ImportResponse>, AppError> {
    let llm: &dyn GenerativeModel = state.llm.as_deref().ok_or(LlmError::MissingApiKey)?;

    let document = parse_resume(llm, text).await?;

    let mut store = state.store.lock().await;
    store.set_override(Some(document.clone())).await?;
    info!("Imported resume as override document");

    Ok(Json(ImportResponse {
        document,
        edit_mode: store.edit_mode_active(),
    }))
}
