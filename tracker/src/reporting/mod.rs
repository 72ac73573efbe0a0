//! Startup reports sent by servers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::deployment::hooks::register_hooks;
use crate::deployment::state::HasDeployment;
use crate::errors::TrackerError;
use crate::lifecycle::{Lifecycle, LifecycleEvent};
use crate::models::report::DeploymentReport;

/// Deployment properties a server reports when it starts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartupReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_versions: Option<BTreeMap<String, String>>,

    /// Contents of the server's deploy manifest. Missing if it could not be loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_info: Option<DeploymentReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_versions: Option<Vec<u32>>,
}

impl StartupReport {
    pub fn parse(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Applies startup reports to server records
pub struct Reporter<T> {
    lifecycle: Lifecycle<T>,
}

impl<T> Reporter<T>
where
    T: HasDeployment + 'static,
{
    /// Create a reporter with the deployment hooks registered
    pub fn new() -> Self {
        let mut lifecycle = Lifecycle::new();
        register_hooks(&mut lifecycle);
        Self { lifecycle }
    }

    /// Create a reporter around an existing lifecycle
    pub fn with_lifecycle(lifecycle: Lifecycle<T>) -> Self {
        Self { lifecycle }
    }

    /// Process a server's startup
    ///
    /// Runs the startup hooks, then stores the reported properties. The
    /// deploy report is always replaced; other properties are only
    /// assigned when the server sent them. Returns `false` if a hook halted
    /// the startup, in which case nothing is assigned.
    pub fn startup(&self, server: &mut T, report: StartupReport) -> bool {
        if !self.lifecycle.run_before(LifecycleEvent::Startup, server) {
            warn!("Startup of server {} halted by a hook", server.server_id());
            return false;
        }

        let deployment = server.deployment_mut();
        if let Some(plugin_versions) = report.plugin_versions {
            deployment.plugin_versions = plugin_versions;
        }
        if let Some(protocol_versions) = report.protocol_versions {
            deployment.protocol_versions = protocol_versions;
        }
        if report.deploy_info.is_none() {
            warn!("Server {} did not send a deploy report", server.server_id());
        }
        server.deployment_mut().replace_report(report.deploy_info);

        info!(
            "Server {} started with nextgen {}",
            server.server_id(),
            server
                .deployment()
                .deploy_info
                .as_ref()
                .and_then(DeploymentReport::runtime_commit)
                .unwrap_or("unknown")
        );
        true
    }
}

impl<T> Default for Reporter<T>
where
    T: HasDeployment + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
