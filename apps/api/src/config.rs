use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::Locale;

/// Where the override document is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    File,
    Redis(String),
    Memory,
}

/// GitHub template repository a deployed copy is generated from.
#[derive(Debug, Clone)]
pub struct TemplateRepo {
    pub token: String,
    pub owner: String,
    pub name: String,
}

/// Object storage location of the static résumé file.
#[derive(Debug, Clone)]
pub struct S3Source {
    pub bucket: String,
    pub key: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Application configuration loaded from environment variables.
/// Optional integrations are `None` when their variables are absent.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub default_locale: Locale,
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub gemini_api_key: Option<String>,
    pub chat_model: String,
    pub template_repo: Option<TemplateRepo>,
    pub netlify_token: Option<String>,
    pub vercel_token: Option<String>,
    pub deploy_poll_interval: Duration,
    pub deploy_max_polls: u32,
    pub resume_file_path: PathBuf,
    pub resume_s3: Option<S3Source>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend = match optional_env("STORAGE_BACKEND").as_deref() {
            None | Some("file") => StorageBackend::File,
            Some("memory") => StorageBackend::Memory,
            Some("redis") => StorageBackend::Redis(
                optional_env("REDIS_URL")
                    .context("REDIS_URL must be set when STORAGE_BACKEND=redis")?,
            ),
            Some(other) => bail!("STORAGE_BACKEND must be file, redis or memory (got '{other}')"),
        };

        let template_repo = match (
            optional_env("GITHUB_TOKEN"),
            optional_env("TEMPLATE_REPO_OWNER"),
            optional_env("TEMPLATE_REPO_NAME"),
        ) {
            (Some(token), Some(owner), Some(name)) => Some(TemplateRepo { token, owner, name }),
            _ => None,
        };

        let resume_s3 = optional_env("S3_BUCKET").map(|bucket| S3Source {
            bucket,
            key: optional_env("S3_RESUME_KEY").unwrap_or_else(|| "resume.pdf".to_string()),
            endpoint: optional_env("S3_ENDPOINT"),
            access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
        });

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            default_locale: match optional_env("DEFAULT_LOCALE") {
                Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
                None => Locale::En,
            },
            storage_backend,
            data_dir: optional_env("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/state")),
            gemini_api_key: optional_env("GEMINI_API_KEY").filter(|k| k != "PLACEHOLDER_API_KEY"),
            chat_model: optional_env("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|| crate::llm_client::DEFAULT_CHAT_MODEL.to_string()),
            template_repo,
            netlify_token: optional_env("NETLIFY_TOKEN"),
            vercel_token: optional_env("VERCEL_TOKEN"),
            deploy_poll_interval: Duration::from_secs(
                parse_env("DEPLOY_POLL_INTERVAL_SECS", 5)
                    .context("DEPLOY_POLL_INTERVAL_SECS must be a whole number of seconds")?,
            ),
            deploy_max_polls: parse_env("DEPLOY_MAX_POLLS", 120)
                .context("DEPLOY_MAX_POLLS must be a positive integer")?,
            resume_file_path: optional_env("RESUME_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/resume.pdf")),
            resume_s3,
        })
    }
}

/// Unset and empty variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for '{key}': {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Memory storage and no external integrations.
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            default_locale: Locale::En,
            storage_backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data/state"),
            gemini_api_key: None,
            chat_model: crate::llm_client::DEFAULT_CHAT_MODEL.to_string(),
            template_repo: None,
            netlify_token: None,
            vercel_token: None,
            deploy_poll_interval: Duration::from_secs(5),
            deploy_max_polls: 120,
            resume_file_path: PathBuf::from("./data/resume.pdf"),
            resume_s3: None,
        }
    }
}
