//! Server record storage

pub mod memory;

use std::collections::BTreeSet;

use crate::errors::TrackerError;
use crate::models::server::Server;

/// Persistence for server records
pub trait ServerStore: Send + Sync {
    /// Server by ID
    fn get(&self, id: &str) -> Result<Option<Server>, TrackerError>;

    /// Insert or replace a server
    fn save(&self, server: Server) -> Result<(), TrackerError>;

    /// All servers, ordered by ID
    fn all(&self) -> Result<Vec<Server>, TrackerError>;

    /// Servers whose reported runtime commit is one of `commits`, ordered by ID
    ///
    /// Servers without a report, or with runtime data lacking a commit, never match.
    fn find_by_runtime_commits(&self, commits: &BTreeSet<String>) -> Result<Vec<Server>, TrackerError>;
}
