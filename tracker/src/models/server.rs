//! Server record

use serde::{Deserialize, Serialize};

use crate::deployment::state::{DeploymentState, HasDeployment};

/// Kind of server process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerRole {
    /// Game server running SportBukkit
    #[default]
    Game,

    /// BungeeCord proxy
    Bungee,
}

/// A managed server as stored by the tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Unique server ID
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub role: ServerRole,

    /// Deployment fields, stored inline with the rest of the record
    #[serde(flatten)]
    pub deployment: DeploymentState,
}

impl Server {
    /// Create a game server with no deployment data
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ServerRole::Game,
            deployment: DeploymentState::default(),
        }
    }

    /// Create a new server record from this one's cloneable configuration
    pub fn clone_as(&self, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: self.role,
            deployment: self.deployment.clone_config(),
        }
    }
}

impl HasDeployment for Server {
    fn server_id(&self) -> &str {
        &self.id
    }

    fn is_bungee(&self) -> bool {
        self.role == ServerRole::Bungee
    }

    fn deployment(&self) -> &DeploymentState {
        &self.deployment
    }

    fn deployment_mut(&mut self) -> &mut DeploymentState {
        &mut self.deployment
    }
}
