use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::export::content_disposition;
use crate::render::download_file_name;
use crate::state::AppState;

/// GET /api/v1/resume/download
///
/// Serves the static résumé under a name derived from the displayed person.
pub async fn handle_download_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    let name = state.store.lock().await.current()["basics"]["name"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    let bytes = state
        .resume_source
        .fetch()
        .await?
        .ok_or_else(|| AppError::NotFound("No resume file has been published".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&download_file_name(&name))),
        ],
        bytes,
    )
        .into_response())
}
