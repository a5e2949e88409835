mod assistant;
mod config;
mod deploy;
mod errors;
mod export;
mod import;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::deploy::{DeploymentTracker, HostingClient, PollSettings};
use crate::export::build_resume_source;
use crate::llm_client::{GeminiClient, GenerativeModel};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{build_durable_store, DocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Restore the override document, if one was saved
    let durable = build_durable_store(&config)?;
    let store = DocumentStore::load(durable, config.default_locale).await;
    info!(
        "Document store ready (locale: {}, edit mode: {})",
        store.locale(),
        store.edit_mode_active()
    );

    // Initialize LLM client
    let llm: Option<Arc<dyn GenerativeModel>> = match &config.gemini_api_key {
        Some(key) => {
            info!("LLM client initialized (chat model: {})", config.chat_model);
            Some(Arc::new(GeminiClient::new(key.clone())?))
        }
        None => {
            warn!("GEMINI_API_KEY is missing. Chat and resume parsing are disabled.");
            None
        }
    };

    // Initialize hosting client and deployment tracker
    let hosting = HostingClient::new(&config)?;
    if config.template_repo.is_none() {
        warn!("GitHub template repository is not configured. Deployments will fail.");
    }
    let deployments = DeploymentTracker::new(Arc::new(hosting), PollSettings::from_config(&config));

    // Initialize resume file source (local disk or S3 / MinIO)
    let resume_source = build_resume_source(&config).await;

    // Build app state
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        llm,
        deployments: Arc::new(deployments),
        resume_source,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict CORS to the site origin once it is configurable
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
