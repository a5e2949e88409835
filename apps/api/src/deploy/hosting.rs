//! Hosting client: GitHub, Netlify and Vercel REST calls.
//!
//! A deployment is: generate a repository from the template, commit the
//! document as `src/data/resume.json`, then link the repository to the
//! chosen platform. Netlify builds on link, so its site id doubles as the
//! deployment id.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, TemplateRepo};
use crate::deploy::platform::{
    map_netlify_state, map_vercel_state, DeployStatus, Platform, StatusObservation,
    TemplateCheck, TriggeredDeployment,
};

const GITHUB_API_URL: &str = "https://api.github.com";
const NETLIFY_API_URL: &str = "https://api.netlify.com/api/v1";
const VERCEL_API_URL: &str = "https://api.vercel.com";
/// Required for the template generation endpoint.
const GITHUB_TEMPLATE_ACCEPT: &str = "application/vnd.github.baptiste-preview+json";
const DOCUMENT_PATH: &str = "src/data/resume.json";
const USER_AGENT: &str = concat!("portfolio-api/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Missing {0} configuration")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{action} failed (status {status}): {message}")]
    Api {
        action: &'static str,
        status: u16,
        message: String,
    },
}

#[async_trait]
pub trait HostingProvider: Send + Sync {
    async fn trigger(
        &self,
        document: &Value,
        platform: Platform,
        site_name: &str,
    ) -> Result<TriggeredDeployment, DeployError>;

    async fn status(&self, platform: Platform, deployment_id: &str) -> Result<StatusObservation, DeployError>;

    async fn template_check(&self) -> Result<TemplateCheck, DeployError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (only the fields we read)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GithubRepo {
    id: u64,
    full_name: String,
    html_url: String,
    default_branch: String,
    owner: GithubOwner,
    #[serde(default)]
    is_template: bool,
}

#[derive(Debug, Deserialize)]
struct GithubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubFile {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct NetlifySite {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NetlifyDeploy {
    state: Option<String>,
    ssl_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VercelProject {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VercelDeployment {
    id: String,
    url: Option<String>,
    ready_state: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HostingClient {
    client: Client,
    github: Option<TemplateRepo>,
    netlify_token: Option<String>,
    vercel_token: Option<String>,
}

impl HostingClient {
    pub fn new(config: &Config) -> Result<Self, DeployError> {
        Ok(Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()?,
            github: config.template_repo.clone(),
            netlify_token: config.netlify_token.clone(),
            vercel_token: config.vercel_token.clone(),
        })
    }

    fn github(&self) -> Result<&TemplateRepo, DeployError> {
        self.github.as_ref().ok_or(DeployError::NotConfigured("GitHub"))
    }

    fn platform_token(&self, platform: Platform) -> Result<&str, DeployError> {
        match platform {
            Platform::Netlify => self.netlify_token.as_deref().ok_or(DeployError::NotConfigured("Netlify")),
            Platform::Vercel => self.vercel_token.as_deref().ok_or(DeployError::NotConfigured("Vercel")),
        }
    }

    async fn create_repo(&self, repo: &TemplateRepo, name: &str) -> Result<GithubRepo, DeployError> {
        info!("Creating repo {name} from template {}/{}", repo.owner, repo.name);
        let request = self
            .client
            .post(format!("{GITHUB_API_URL}/repos/{}/{}/generate", repo.owner, repo.name))
            .header("Authorization", format!("token {}", repo.token))
            .header("Accept", GITHUB_TEMPLATE_ACCEPT)
            .json(&json!({ "owner": repo.owner, "name": name, "private": false }));
        Ok(send(request, "Create repo").await?.json().await?)
    }

    /// Creates or replaces `src/data/resume.json` in the new repository.
    async fn commit_document(
        &self,
        repo: &TemplateRepo,
        created: &GithubRepo,
        document: &Value,
    ) -> Result<(), DeployError> {
        let url = format!(
            "{GITHUB_API_URL}/repos/{}/{}/contents/{DOCUMENT_PATH}",
            created.owner.login,
            repo_name(&created.full_name)
        );
        let auth = format!("token {}", repo.token);

        // The template usually ships the file already; updating needs its sha.
        let existing = self.client.get(&url).header("Authorization", &auth).send().await?;
        let sha = if existing.status().is_success() {
            Some(existing.json::<GithubFile>().await?.sha)
        } else {
            None
        };

        let pretty = serde_json::to_string_pretty(document)?;
        let content = base64::engine::general_purpose::STANDARD.encode(pretty);

        let request = self
            .client
            .put(&url)
            .header("Authorization", &auth)
            .json(&json!({ "message": "Update resume data", "content": content, "sha": sha }));
        send(request, "Commit file").await?;
        debug!("Committed {DOCUMENT_PATH} to {}", created.full_name);
        Ok(())
    }

    async fn create_netlify_site(
        &self,
        token: &str,
        created: &GithubRepo,
        site_name: &str,
    ) -> Result<TriggeredDeployment, DeployError> {
        let request = self
            .client
            .post(format!("{NETLIFY_API_URL}/sites"))
            .bearer_auth(token)
            .json(&json!({
                "name": site_name,
                "repo": {
                    "provider": "github",
                    "id": created.id,
                    "repo": created.full_name,
                    "private": false,
                    "branch": created.default_branch,
                }
            }));
        let site: NetlifySite = send(request, "Create Netlify site").await?.json().await?;

        Ok(TriggeredDeployment {
            provider_id: site.id,
            repo_url: Some(created.html_url.clone()),
            site_url: site.url,
        })
    }

    async fn create_vercel_deployment(
        &self,
        token: &str,
        created: &GithubRepo,
        site_name: &str,
    ) -> Result<TriggeredDeployment, DeployError> {
        let request = self
            .client
            .post(format!("{VERCEL_API_URL}/v9/projects"))
            .bearer_auth(token)
            .json(&json!({
                "name": site_name,
                "gitRepository": { "type": "github", "repo": created.full_name }
            }));
        let project: VercelProject = send(request, "Create Vercel project").await?.json().await?;

        let request = self
            .client
            .post(format!("{VERCEL_API_URL}/v13/deployments"))
            .bearer_auth(token)
            .json(&json!({
                "name": site_name,
                "project": project.id,
                "gitSource": {
                    "type": "github",
                    "repoId": created.id,
                    "ref": created.default_branch,
                }
            }));
        let deployment: VercelDeployment = send(request, "Trigger Vercel deployment").await?.json().await?;

        Ok(TriggeredDeployment {
            provider_id: deployment.id,
            repo_url: Some(created.html_url.clone()),
            site_url: Some(format!("https://{site_name}.vercel.app")),
        })
    }
}

#[async_trait]
impl HostingProvider for HostingClient {
    async fn trigger(
        &self,
        document: &Value,
        platform: Platform,
        site_name: &str,
    ) -> Result<TriggeredDeployment, DeployError> {
        let repo = self.github()?;
        // Checked before any repository is created.
        let token = self.platform_token(platform)?;

        let created = self.create_repo(repo, site_name).await?;
        self.commit_document(repo, &created, document).await?;

        let triggered = match platform {
            Platform::Netlify => self.create_netlify_site(token, &created, site_name).await?,
            Platform::Vercel => self.create_vercel_deployment(token, &created, site_name).await?,
        };
        info!(
            "Deployment triggered on {platform}: id={}, repo={}",
            triggered.provider_id, created.html_url
        );
        Ok(triggered)
    }

    async fn status(&self, platform: Platform, deployment_id: &str) -> Result<StatusObservation, DeployError> {
        let token = self.platform_token(platform)?;
        match platform {
            Platform::Netlify => {
                let request = self
                    .client
                    .get(format!("{NETLIFY_API_URL}/sites/{deployment_id}/deploys"))
                    .bearer_auth(token);
                let deploys: Vec<NetlifyDeploy> = send(request, "Fetch Netlify deploys").await?.json().await?;
                Ok(netlify_observation(deploys.into_iter().next()))
            }
            Platform::Vercel => {
                let request = self
                    .client
                    .get(format!("{VERCEL_API_URL}/v13/deployments/{deployment_id}"))
                    .bearer_auth(token);
                let deployment: VercelDeployment =
                    send(request, "Fetch Vercel deployment").await?.json().await?;
                Ok(vercel_observation(&deployment))
            }
        }
    }

    async fn template_check(&self) -> Result<TemplateCheck, DeployError> {
        let repo = self.github()?;
        let request = self
            .client
            .get(format!("{GITHUB_API_URL}/repos/{}/{}", repo.owner, repo.name))
            .header("Authorization", format!("token {}", repo.token))
            .header("Accept", "application/vnd.github.v3+json");
        let found: GithubRepo = send(request, "Fetch template repo").await?.json().await?;
        Ok(template_check_result(found.is_template))
    }
}

/// Sends `request`, turning a non-success status into `DeployError::Api`
/// carrying the provider's message.
async fn send(request: RequestBuilder, action: &'static str) -> Result<Response, DeployError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DeployError::Api {
        action,
        status: status.as_u16(),
        message: provider_message(&body),
    })
}

/// Pulls a readable message out of a GitHub/Netlify/Vercel error body.
fn provider_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };
    value["message"]
        .as_str()
        .or_else(|| value["error"]["message"].as_str())
        .or_else(|| value["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn repo_name(full_name: &str) -> &str {
    full_name.rsplit('/').next().unwrap_or(full_name)
}

fn netlify_observation(latest: Option<NetlifyDeploy>) -> StatusObservation {
    match latest {
        None => StatusObservation {
            status: map_netlify_state(None),
            url: None,
        },
        Some(deploy) => StatusObservation {
            status: map_netlify_state(Some(deploy.state.as_deref().unwrap_or_default())),
            url: deploy.ssl_url.or(deploy.url),
        },
    }
}

fn vercel_observation(deployment: &VercelDeployment) -> StatusObservation {
    let status = map_vercel_state(deployment.ready_state.as_deref().unwrap_or_default());
    StatusObservation {
        status,
        url: match (status, &deployment.url) {
            (DeployStatus::Ready, Some(url)) => Some(format!("https://{url}")),
            _ => None,
        },
    }
}

fn template_check_result(is_template: bool) -> TemplateCheck {
    TemplateCheck {
        is_template,
        message: if is_template {
            "Template is enabled! Ready to deploy.".to_string()
        } else {
            "Template is NOT enabled. Please enable it in GitHub settings.".to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_shapes() {
        assert_eq!(provider_message(r#"{"message":"Name already exists"}"#), "Name already exists");
        assert_eq!(
            provider_message(r#"{"error":{"code":"forbidden","message":"Not allowed"}}"#),
            "Not allowed"
        );
        assert_eq!(provider_message(r#"{"error":"bad token"}"#), "bad token");
        assert_eq!(provider_message("  Bad Gateway "), "Bad Gateway");
    }

    #[test]
    fn test_netlify_observation_prefers_ssl_url() {
        let obs = netlify_observation(Some(NetlifyDeploy {
            state: Some("ready".into()),
            ssl_url: Some("https://site.netlify.app".into()),
            url: Some("http://site.netlify.app".into()),
        }));
        assert_eq!(obs.status, DeployStatus::Ready);
        assert_eq!(obs.url.as_deref(), Some("https://site.netlify.app"));

        assert_eq!(netlify_observation(None).status, DeployStatus::Queued);
    }

    #[test]
    fn test_vercel_observation_only_links_when_ready() {
        let mut deployment = VercelDeployment {
            id: "dpl_1".into(),
            url: Some("site-abc.vercel.app".into()),
            ready_state: Some("BUILDING".into()),
        };
        assert_eq!(vercel_observation(&deployment).url, None);

        deployment.ready_state = Some("READY".into());
        let obs = vercel_observation(&deployment);
        assert_eq!(obs.status, DeployStatus::Ready);
        assert_eq!(obs.url.as_deref(), Some("https://site-abc.vercel.app"));
    }

    #[test]
    fn test_repo_wire_type_defaults_is_template() {
        let repo: GithubRepo = serde_json::from_str(
            r#"{"id":1,"full_name":"me/site","html_url":"https://github.com/me/site",
                "default_branch":"main","owner":{"login":"me"}}"#,
        )
        .unwrap();
        assert!(!repo.is_template);
        assert_eq!(repo_name(&repo.full_name), "site");
        assert!(template_check_result(true).message.starts_with("Template is enabled"));
    }
}
