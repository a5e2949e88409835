// Deployment workflow: publish a copy of the site to a hosting platform and
// track it until it is live or failed.

pub mod handlers;
pub mod hosting;
pub mod platform;
pub mod tracker;

pub use hosting::{DeployError, HostingClient, HostingProvider};
pub use platform::{DeployStatus, Platform};
pub use tracker::{DeploymentRecord, DeploymentTracker, PollSettings};
