use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::import::pdf::PdfError;
use crate::llm_client::LlmError;
use crate::store::validate::ImportError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// An optional integration (AI, hosting) has no credentials configured.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("Deployment error: {0}")]
    Deploy(#[from] DeployError),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg.clone())
            }
            AppError::Store(StoreError::Path(e)) => {
                (StatusCode::BAD_REQUEST, "INVALID_EDIT", e.to_string())
            }
            AppError::Store(StoreError::Import(e)) => {
                let code = match e {
                    ImportError::MissingSections(_) => "MISSING_SECTIONS",
                    ImportError::Parse(_) | ImportError::NotAnObject => "INVALID_JSON",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to save portfolio data".to_string(),
                )
            }
            AppError::Llm(LlmError::MissingApiKey) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "UNAVAILABLE",
                "Invalid API Key. The AI service is not configured".to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let message = match e {
                    LlmError::RateLimited { .. } => e.to_string(),
                    LlmError::ModelsExhausted { last, .. } => {
                        format!("Failed to parse resume with any available model: {last}")
                    }
                    _ => "An AI processing error occurred".to_string(),
                };
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", message)
            }
            AppError::Pdf(e @ PdfError::Task(_)) => {
                tracing::error!("PDF error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_ERROR",
                    "Failed to extract text from PDF. Please try a different file.".to_string(),
                )
            }
            AppError::Pdf(e) => (StatusCode::UNPROCESSABLE_ENTITY, "PDF_ERROR", e.to_string()),
            AppError::Deploy(e @ DeployError::NotConfigured(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", e.to_string())
            }
            AppError::Deploy(e) => {
                tracing::error!("Deployment error: {e}");
                (StatusCode::BAD_GATEWAY, "DEPLOY_ERROR", e.to_string())
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PathError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_sections_names_each_section() {
        let err = AppError::Store(StoreError::Import(ImportError::MissingSections(vec![
            "skills".into(),
            "education".into(),
        ])));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_SECTIONS");
        assert_eq!(
            body["error"]["message"],
            "Invalid JSON: Missing required sections: skills, education"
        );
    }

    #[tokio::test]
    async fn test_path_error_is_bad_request() {
        let (status, body) = render(AppError::Store(StoreError::Path(PathError::Empty))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_EDIT");
    }

    #[tokio::test]
    async fn test_llm_details_are_not_echoed() {
        let err = AppError::Llm(LlmError::Api {
            status: 500,
            message: "secret upstream detail".into(),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body["error"]["message"].as_str().unwrap().contains("secret"));
    }
}
