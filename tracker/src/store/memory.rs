//! In-memory server store

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use tracing::info;

use crate::errors::TrackerError;
use crate::filesys::file::File;
use crate::models::server::Server;
use crate::store::ServerStore;

/// Server store holding every record in memory
#[derive(Default)]
pub struct MemoryServerStore {
    servers: RwLock<HashMap<String, Server>>,
}

impl MemoryServerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given servers
    pub fn from_servers(servers: impl IntoIterator<Item = Server>) -> Self {
        let servers = servers
            .into_iter()
            .map(|server| (server.id.clone(), server))
            .collect();
        Self {
            servers: RwLock::new(servers),
        }
    }

    /// Load servers from a JSON file containing an array of records
    pub async fn load(file: &File) -> Result<Self, TrackerError> {
        let servers: Vec<Server> = file.read_json().await?;
        info!("Loaded {} servers from {}", servers.len(), file.path().display());
        Ok(Self::from_servers(servers))
    }

    /// Write every server to a JSON file
    pub async fn dump(&self, file: &File) -> Result<(), TrackerError> {
        let servers = self.all()?;
        file.write_json(&servers).await
    }

    pub fn len(&self) -> usize {
        let servers = self.servers.read().unwrap_or_else(|e| e.into_inner());
        servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect_sorted<'a>(servers: impl Iterator<Item = &'a Server>) -> Vec<Server> {
        let mut servers: Vec<Server> = servers.cloned().collect();
        servers.sort_by(|a, b| a.id.cmp(&b.id));
        servers
    }
}

impl ServerStore for MemoryServerStore {
    fn get(&self, id: &str) -> Result<Option<Server>, TrackerError> {
        let servers = self.servers.read().unwrap_or_else(|e| e.into_inner());
        Ok(servers.get(id).cloned())
    }

    fn save(&self, server: Server) -> Result<(), TrackerError> {
        let mut servers = self.servers.write().unwrap_or_else(|e| e.into_inner());
        servers.insert(server.id.clone(), server);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Server>, TrackerError> {
        let servers = self.servers.read().unwrap_or_else(|e| e.into_inner());
        Ok(Self::collect_sorted(servers.values()))
    }

    fn find_by_runtime_commits(&self, commits: &BTreeSet<String>) -> Result<Vec<Server>, TrackerError> {
        let servers = self.servers.read().unwrap_or_else(|e| e.into_inner());
        Ok(Self::collect_sorted(servers.values().filter(|server| {
            server
                .deployment
                .deploy_info
                .as_ref()
                .and_then(|report| report.runtime_commit())
                .is_some_and(|commit| commits.contains(commit))
        })))
    }
}
