pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::deploy::handlers as deploy;
use crate::export::handlers as export;
use crate::import::handlers as import;
use crate::state::AppState;
use crate::store::handlers as portfolio;

/// Résumé PDFs can exceed axum's default 2 MB body limit.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio document
        .route("/api/v1/portfolio", get(portfolio::handle_get_portfolio))
        .route("/api/v1/portfolio/view", get(portfolio::handle_get_view))
        .route("/api/v1/portfolio/labels", get(portfolio::handle_get_labels))
        .route("/api/v1/portfolio/template", get(portfolio::handle_get_template))
        .route("/api/v1/portfolio/locale", put(portfolio::handle_select_locale))
        .route(
            "/api/v1/portfolio/edit-mode",
            post(portfolio::handle_enable_edit_mode).delete(portfolio::handle_clear_override),
        )
        .route(
            "/api/v1/portfolio/override",
            put(portfolio::handle_import_override).delete(portfolio::handle_clear_override),
        )
        .route("/api/v1/portfolio/fields", patch(portfolio::handle_edit_field))
        // Assistant
        .route("/api/v1/chat", post(assistant::handle_chat))
        // Résumé import / export
        .route(
            "/api/v1/import/resume",
            post(import::handle_import_resume).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route("/api/v1/import/text", post(import::handle_import_text))
        .route("/api/v1/resume/download", get(export::handle_download_resume))
        // Deployments
        .route("/api/v1/deployments", post(deploy::handle_create_deployment))
        .route(
            "/api/v1/deployments/template-check",
            get(deploy::handle_template_check),
        )
        .route(
            "/api/v1/deployments/:id",
            get(deploy::handle_get_deployment).delete(deploy::handle_cancel_deployment),
        )
        .with_state(state)
}
