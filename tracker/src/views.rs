//! API views of server deployment state

use std::path::Path;

use api_models::models::{
    commit_or_unknown, DeploymentStatusResponse, ServerListResponse, ServerSummary,
};
use tracing::warn;

use crate::deployment::state::HasDeployment;
use crate::deployment::PLUGINS_PACKAGE;
use crate::models::server::Server;

/// Deployment status of a server
///
/// Missing commits render as "unknown". So does a malformed runtime report,
/// which is logged instead of failing the response.
pub fn deployment_status(server: &Server, repository_base_path: &Path) -> DeploymentStatusResponse {
    let runtime_commit = match server.deployed_commit(None) {
        Ok(commit) => commit,
        Err(e) => {
            warn!("Server {} has a bad deploy report: {}", server.id, e);
            None
        }
    };

    DeploymentStatusResponse {
        server_id: server.id.clone(),
        server_name: server.name.clone(),
        deploy_path: server.deploy_path(),
        update_server_path: server.update_server_path(repository_base_path),
        runtime_commit: commit_or_unknown(runtime_commit),
        application_package: server.application_package().to_string(),
        application_commit: commit_or_unknown(server.deployed_application_commit()),
        plugins_commit: commit_or_unknown(server.deployment.package_commit(PLUGINS_PACKAGE)),
        plugin_versions: server.deployment.plugin_versions.clone(),
        protocol_versions: server.deployment.protocol_versions.clone(),
    }
}

/// Summary of each server in a fleet query result
pub fn server_list(servers: &[Server]) -> ServerListResponse {
    let servers: Vec<ServerSummary> = servers
        .iter()
        .map(|server| ServerSummary {
            id: server.id.clone(),
            name: server.name.clone(),
            runtime_commit: commit_or_unknown(
                server
                    .deployment
                    .deploy_info
                    .as_ref()
                    .and_then(|report| report.runtime_commit()),
            ),
        })
        .collect();

    ServerListResponse {
        total: servers.len(),
        servers,
    }
}
