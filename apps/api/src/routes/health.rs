use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Liveness plus which optional integrations this instance was started with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "service": "portfolio-api",
        "version": env!("CARGO_PKG_VERSION"),
        "integrations": {
            "assistant": state.llm.is_some(),
            "deployments": config.template_repo.is_some()
                && (config.netlify_token.is_some() || config.vercel_token.is_some()),
            "resumeFromS3": config.resume_s3.is_some(),
        }
    }))
}
