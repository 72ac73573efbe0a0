//! Tracker API models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for commits the tracker cannot resolve
pub const UNKNOWN: &str = "unknown";

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Deployment state of a single server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentStatusResponse {
    pub server_id: String,
    pub server_name: String,
    pub deploy_path: String,
    pub update_server_path: String,

    /// Commit of the nextgen runtime, or "unknown"
    pub runtime_commit: String,

    /// Package name of the server's application (e.g. SportBukkit)
    pub application_package: String,
    pub application_commit: String,
    pub plugins_commit: String,

    pub plugin_versions: BTreeMap<String, String>,
    pub protocol_versions: Vec<u32>,
}

/// Summary row for fleet-wide queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    pub runtime_commit: String,
}

/// Fleet query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerListResponse {
    pub servers: Vec<ServerSummary>,
    pub total: usize,
}

/// Render an optional commit for API output
pub fn commit_or_unknown(commit: Option<&str>) -> String {
    commit.unwrap_or(UNKNOWN).to_string()
}
