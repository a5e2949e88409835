use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::deploy::DeploymentTracker;
use crate::export::ResumeSource;
use crate::llm_client::GenerativeModel;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single document of record. Every write is a whole-tree swap under this lock.
    pub store: Arc<Mutex<DocumentStore>>,
    /// `None` when no Gemini API key is configured.
    pub llm: Option<Arc<dyn GenerativeModel>>,
    pub deployments: Arc<DeploymentTracker>,
    pub resume_source: Arc<dyn ResumeSource>,
    pub config: Config,
}
