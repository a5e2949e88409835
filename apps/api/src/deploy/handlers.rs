//! Axum route handlers for the deployment workflow.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::deploy::platform::{default_site_name, Platform, TemplateCheck};
use crate::deploy::DeploymentRecord;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub platform: Platform,
    #[serde(default)]
    pub site_name: Option<String>,
    /// Document to publish; defaults to the one currently served.
    #[serde(default)]
    pub document: Option<Value>,
}

/// POST /api/v1/deployments
///
/// Triggers the deployment and returns its record; status is then polled in
/// the background and read back with GET /api/v1/deployments/:id.
pub async fn handle_create_deployment(
    State(state): State<AppState>,
    Json(request): Json<DeployRequest>,
) -> Result<(StatusCode, Json<DeploymentRecord>), AppError> {
    let document = match request.document {
        Some(document) => document,
        None => state.store.lock().await.current().clone(),
    };

    let site_name = request
        .site_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default_site_name(document["basics"]["name"].as_str().unwrap_or_default()));

    let record = state
        .deployments
        .start(&document, request.platform, site_name)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(record)))
}

/// GET /api/v1/deployments/:id
pub async fn handle_get_deployment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeploymentRecord>, AppError> {
    state
        .deployments
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Deployment {id} not found")))
}

/// DELETE /api/v1/deployments/:id
pub async fn handle_cancel_deployment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeploymentRecord>, AppError> {
    state
        .deployments
        .cancel(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Deployment {id} not found")))
}

/// GET /api/v1/deployments/template-check
pub async fn handle_template_check(
    State(state): State<AppState>,
) -> Result<Json<TemplateCheck>, AppError> {
    let check = state.deployments.provider().template_check().await?;
    Ok(Json(check))
}
