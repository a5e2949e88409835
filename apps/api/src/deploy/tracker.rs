//! Deployment Tracker: owns deployment records and their poll tasks.
//!
//! Each triggered deployment gets one background task that polls the
//! provider on a fixed interval until the status is terminal, the poll
//! budget runs out, or the deployment is cancelled. Dropping the tracker
//! aborts every task still running. Settled records are kept for
//! [`RECORD_RETENTION`] and pruned when the next deployment starts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::deploy::hosting::{DeployError, HostingProvider};
use crate::deploy::platform::{DeployStatus, Platform, StatusObservation};

/// How long a settled deployment stays queryable.
pub const RECORD_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// Status checks before a deployment still in progress is marked failed.
    pub max_polls: u32,
    pub retention: Duration,
}

impl PollSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.deploy_poll_interval,
            max_polls: config.deploy_max_polls.max(1),
            retention: RECORD_RETENTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentRecord {
    pub id: Uuid,
    pub platform: Platform,
    pub site_name: String,
    /// Netlify site id or Vercel deployment id, once triggered.
    pub provider_id: Option<String>,
    pub status: DeployStatus,
    /// Live URL reported by the latest status check.
    pub url: Option<String>,
    pub repo_url: Option<String>,
    pub site_url: Option<String>,
    pub error: Option<String>,
    pub polls: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeploymentRecord {
    fn new(platform: Platform, site_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            platform,
            site_name,
            provider_id: None,
            status: DeployStatus::Queued,
            url: None,
            repo_url: None,
            site_url: None,
            error: None,
            polls: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn observe(&mut self, observation: StatusObservation) {
        self.status = observation.status;
        if observation.url.is_some() {
            self.url = observation.url;
        }
        self.updated_at = Utc::now();
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.status = DeployStatus::Failed;
        self.error = Some(message.into());
        self.updated_at = Utc::now();
    }
}

type Records = Arc<Mutex<HashMap<Uuid, DeploymentRecord>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct DeploymentTracker {
    provider: Arc<dyn HostingProvider>,
    settings: PollSettings,
    records: Records,
    tasks: Mutex<HashMap<Uuid, JoinHandle<()>>>,
}

impl DeploymentTracker {
    pub fn new(provider: Arc<dyn HostingProvider>, settings: PollSettings) -> Self {
        Self {
            provider,
            settings,
            records: Arc::new(Mutex::new(HashMap::new())),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn provider(&self) -> &dyn HostingProvider {
        self.provider.as_ref()
    }

    /// Triggers a deployment and starts polling it. A trigger failure is
    /// recorded as a failed deployment and returned.
    pub async fn start(
        &self,
        document: &Value,
        platform: Platform,
        site_name: String,
    ) -> Result<DeploymentRecord, DeployError> {
        let mut record = DeploymentRecord::new(platform, site_name);
        let id = record.id;
        {
            let mut records = lock(&self.records);
            prune_settled(&mut records, self.settings.retention);
            records.insert(id, record.clone());
        }

        let triggered = match self.provider.trigger(document, platform, &record.site_name).await {
            Ok(triggered) => triggered,
            Err(e) => {
                warn!("Deployment {id} failed to start: {e}");
                if let Some(stored) = lock(&self.records).get_mut(&id) {
                    stored.fail(e.to_string());
                }
                return Err(e);
            }
        };

        record.provider_id = Some(triggered.provider_id.clone());
        record.repo_url = triggered.repo_url;
        record.site_url = triggered.site_url;
        record.updated_at = Utc::now();
        lock(&self.records).insert(id, record.clone());

        let handle = tokio::spawn(poll_until_settled(
            self.provider.clone(),
            self.records.clone(),
            id,
            platform,
            triggered.provider_id,
            self.settings,
        ));

        let mut tasks = lock(&self.tasks);
        tasks.retain(|_, task| !task.is_finished());
        tasks.insert(id, handle);

        info!("Deployment {id} started on {platform}");
        Ok(record)
    }

    pub fn get(&self, id: Uuid) -> Option<DeploymentRecord> {
        lock(&self.records).get(&id).cloned()
    }

    /// Stops polling. A deployment still in progress is marked failed.
    pub fn cancel(&self, id: Uuid) -> Option<DeploymentRecord> {
        if let Some(task) = lock(&self.tasks).remove(&id) {
            task.abort();
        }
        let mut records = lock(&self.records);
        let record = records.get_mut(&id)?;
        if !record.status.is_terminal() {
            record.fail("cancelled");
            info!("Deployment {id} cancelled");
        }
        Some(record.clone())
    }
}

/// Drops terminal records last updated before the retention window.
fn prune_settled(records: &mut HashMap<Uuid, DeploymentRecord>, retention: Duration) {
    let retention = chrono::Duration::from_std(retention).unwrap_or(chrono::Duration::MAX);
    let now = Utc::now();
    records.retain(|_, record| {
        !record.status.is_terminal() || now.signed_duration_since(record.updated_at) < retention
    });
}

impl Drop for DeploymentTracker {
    fn drop(&mut self) {
        for (_, task) in lock(&self.tasks).drain() {
            task.abort();
        }
    }
}

async fn poll_until_settled(
    provider: Arc<dyn HostingProvider>,
    records: Records,
    id: Uuid,
    platform: Platform,
    provider_id: String,
    settings: PollSettings,
) {
    let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for attempt in 1..=settings.max_polls {
        ticker.tick().await;

        let observation = provider.status(platform, &provider_id).await;

        let mut guard = lock(&records);
        let Some(record) = guard.get_mut(&id) else {
            return;
        };
        // Cancelled while the status call was in flight.
        if record.status.is_terminal() {
            return;
        }
        record.polls = attempt;

        match observation {
            Ok(observation) => {
                record.observe(observation);
                if record.status.is_terminal() {
                    info!("Deployment {id} finished: {:?}", record.status);
                    return;
                }
            }
            // A single failed check is not fatal; the next tick retries.
            Err(e) => warn!("Polling error for deployment {id} (attempt {attempt}): {e}"),
        }
    }

    if let Some(record) = lock(&records).get_mut(&id) {
        record.fail(format!(
            "Deployment did not finish after {} status checks",
            settings.max_polls
        ));
        warn!("Deployment {id} gave up polling");
    }
}
