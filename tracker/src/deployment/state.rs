//! Per-server deployment state

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::deployment::{BUNGEECORD_PACKAGE, SPORTBUKKIT_PACKAGE};
use crate::errors::TrackerError;
use crate::models::report::DeploymentReport;

/// Deployment fields of a server record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentState {
    /// Path to the update-server script in the nextgen root folder
    ///
    /// Set by operators to point a server at an alternate nextgen checkout,
    /// e.g. for beta testing. The server copies this path into a script in
    /// its own folder during an update and uses that copy as the source for
    /// the next update, so a change only takes effect after two restarts:
    /// one to copy the new path and one to update from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_server_path: Option<String>,

    /// Directory this server is deployed to on its box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_path: Option<String>,

    /// Plugin versions reported by the server at its last startup
    #[serde(default)]
    pub plugin_versions: BTreeMap<String, String>,

    /// Report generated by nextgen and sent by the server at startup.
    /// `None` if the server could not load its deploy manifest.
    #[serde(default)]
    pub deploy_info: Option<DeploymentReport>,

    #[serde(default)]
    pub protocol_versions: Vec<u32>,
}

impl DeploymentState {
    /// Update-server path, falling back to the one in the main nextgen checkout
    pub fn update_server_path(&self, repository_base_path: &Path) -> String {
        match &self.update_server_path {
            Some(path) => path.clone(),
            None => format!("{}/nextgen/update-server", repository_base_path.display()),
        }
    }

    /// Deploy path, falling back to the standard per-server directory
    pub fn deploy_path(&self, server_id: &str) -> String {
        match &self.deploy_path {
            Some(path) => path.clone(),
            None => format!("/minecraft/servers/{}", server_id),
        }
    }

    /// Commit deployed for `package`, or for the nextgen runtime if `None`
    ///
    /// Returns `Ok(None)` when the server has not reported. The runtime
    /// lookup is strict: a report without `version.commit` fails with
    /// [`TrackerError::MalformedReport`]. Package lookups never fail.
    pub fn deployed_commit(&self, package: Option<&str>) -> Result<Option<&str>, TrackerError> {
        let Some(report) = &self.deploy_info else {
            return Ok(None);
        };

        match package {
            Some(package) => Ok(report.package_commit(package)),
            None => report.require_runtime_commit().map(Some),
        }
    }

    /// Commit deployed for a package
    pub fn package_commit(&self, package: &str) -> Option<&str> {
        self.deploy_info
            .as_ref()
            .and_then(|report| report.package_commit(package))
    }

    /// Attach a new report, replacing any previous one
    pub fn replace_report(&mut self, report: Option<DeploymentReport>) {
        self.deploy_info = report;
    }

    /// Forget plugin versions from a previous report
    pub fn reset_plugin_versions(&mut self) {
        self.plugin_versions = BTreeMap::new();
    }

    /// Fields carried over when a server's configuration is cloned
    pub fn clone_config(&self) -> Self {
        Self {
            update_server_path: self.update_server_path.clone(),
            ..Default::default()
        }
    }
}

/// A server record that owns a [`DeploymentState`]
pub trait HasDeployment {
    fn server_id(&self) -> &str;

    /// Whether the server is a BungeeCord proxy rather than a game server
    fn is_bungee(&self) -> bool;

    fn deployment(&self) -> &DeploymentState;

    fn deployment_mut(&mut self) -> &mut DeploymentState;

    fn update_server_path(&self, repository_base_path: &Path) -> String {
        self.deployment().update_server_path(repository_base_path)
    }

    fn deploy_path(&self) -> String {
        self.deployment().deploy_path(self.server_id())
    }

    fn deployed_commit(&self, package: Option<&str>) -> Result<Option<&str>, TrackerError> {
        self.deployment().deployed_commit(package)
    }

    /// Package that holds this server's application binary
    fn application_package(&self) -> &'static str {
        if self.is_bungee() {
            BUNGEECORD_PACKAGE
        } else {
            SPORTBUKKIT_PACKAGE
        }
    }

    fn deployed_application_commit(&self) -> Option<&str> {
        self.deployment().package_commit(self.application_package())
    }
}
