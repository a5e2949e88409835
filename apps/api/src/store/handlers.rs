//! Axum route handlers for the portfolio document.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::{Locale, UiLabels};
use crate::render::{build_page, PageView};
use crate::state::AppState;
use crate::store::demo::schema_template;
use crate::store::{DocumentStore, EditPath, EditValue, StoreError};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PortfolioSnapshot {
    pub document: Value,
    pub locale: Locale,
    pub edit_mode: bool,
}

impl PortfolioSnapshot {
    fn of(store: &DocumentStore) -> Self {
        Self {
            document: store.current().clone(),
            locale: store.locale(),
            edit_mode: store.edit_mode_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocaleRequest {
    pub locale: Locale,
}

#[derive(Debug, Deserialize)]
pub struct FieldEditRequest {
    pub path: String,
    pub value: EditValue,
}

#[derive(Debug, Serialize)]
pub struct FieldEditResponse {
    /// `false` when no override is active and the edit was ignored.
    pub applied: bool,
    pub document: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(State(state): State<AppState>) -> Json<PortfolioSnapshot> {
    let store = state.store.lock().await;
    Json(PortfolioSnapshot::of(&store))
}

/// GET /api/v1/portfolio/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<PageView> {
    let store = state.store.lock().await;
    Json(build_page(store.current(), &store.labels(), store.edit_mode_active()))
}

/// GET /api/v1/portfolio/labels
pub async fn handle_get_labels(State(state): State<AppState>) -> Json<UiLabels> {
    Json(state.store.lock().await.labels())
}

/// GET /api/v1/portfolio/template
///
/// Blank document with every section present, for building one from scratch.
pub async fn handle_get_template() -> Json<Value> {
    Json(schema_template().clone())
}

/// PUT /api/v1/portfolio/locale
pub async fn handle_select_locale(
    State(state): State<AppState>,
    Json(request): Json<LocaleRequest>,
) -> Json<PortfolioSnapshot> {
    let mut store = state.store.lock().await;
    store.select_locale(request.locale);
    Json(PortfolioSnapshot::of(&store))
}

/// POST /api/v1/portfolio/edit-mode
pub async fn handle_enable_edit_mode(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store.enable_edit_mode().await?;
    Ok(Json(PortfolioSnapshot::of(&store)))
}

/// DELETE /api/v1/portfolio/edit-mode and DELETE /api/v1/portfolio/override
///
/// Drops the override and its durable copy; demo content is served again.
pub async fn handle_clear_override(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store.set_override(None).await?;
    Ok(Json(PortfolioSnapshot::of(&store)))
}

/// PUT /api/v1/portfolio/override
///
/// Body is the raw JSON document, validated before it replaces the override.
pub async fn handle_import_override(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<PortfolioSnapshot>, AppError> {
    let mut store = state.store.lock().await;
    store.import_json(&body).await?;
    info!("Override document replaced from upload");
    Ok(Json(PortfolioSnapshot::of(&store)))
}

/// PATCH /api/v1/portfolio/fields
pub async fn handle_edit_field(
    State(state): State<AppState>,
    Json(request): Json<FieldEditRequest>,
) -> Result<Json<FieldEditResponse>, AppError> {
    let path = EditPath::parse(&request.path).map_err(StoreError::from)?;

    let mut store = state.store.lock().await;
    let applied = store.apply_edit(&path, request.value).await?;

    Ok(Json(FieldEditResponse {
        applied,
        document: store.current().clone(),
    }))
}
