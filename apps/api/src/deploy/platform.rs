use std::fmt;

use serde::{Deserialize, Serialize};

/// Static hosting platform a copy of the site is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netlify,
    Vercel,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Netlify => "netlify",
            Platform::Vercel => "vercel",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    Queued,
    Building,
    Ready,
    Failed,
}

impl DeployStatus {
    /// Polling stops once a deployment reaches a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, DeployStatus::Ready | DeployStatus::Failed)
    }
}

/// One status poll result.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusObservation {
    pub status: DeployStatus,
    pub url: Option<String>,
}

/// What a successful trigger hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredDeployment {
    /// Identifier to poll with: the Netlify site id or the Vercel deployment id.
    pub provider_id: String,
    pub repo_url: Option<String>,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCheck {
    pub is_template: bool,
    pub message: String,
}

/// Netlify deploy `state` of the latest deploy; `None` when the site has no
/// deploys yet.
pub fn map_netlify_state(state: Option<&str>) -> DeployStatus {
    match state {
        None => DeployStatus::Queued,
        Some("ready") => DeployStatus::Ready,
        Some("error") | Some("failed") => DeployStatus::Failed,
        Some(_) => DeployStatus::Building,
    }
}

/// Vercel deployment `readyState`.
pub fn map_vercel_state(ready_state: &str) -> DeployStatus {
    match ready_state {
        "READY" => DeployStatus::Ready,
        "ERROR" | "CANCELED" => DeployStatus::Failed,
        _ => DeployStatus::Building,
    }
}

/// `Jordan Avery` → `jordanavery-portfolio`.
pub fn default_site_name(person_name: &str) -> String {
    let slug: String = person_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    format!("{slug}-portfolio")
}
