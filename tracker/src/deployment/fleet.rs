//! Fleet-wide deployment queries

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::errors::TrackerError;
use crate::models::server::Server;
use crate::repository::RepositoryRegistry;
use crate::store::ServerStore;

/// Queries across every server in a store
#[derive(Clone)]
pub struct FleetQueries {
    repositories: Arc<RepositoryRegistry>,
    store: Arc<dyn ServerStore>,
}

impl FleetQueries {
    pub fn new(repositories: Arc<RepositoryRegistry>, store: Arc<dyn ServerStore>) -> Self {
        Self { repositories, store }
    }

    /// Servers whose nextgen runtime commit is any of `commits`
    pub fn servers_with_deployed_commit<I, C>(&self, commits: I) -> Result<Vec<Server>, TrackerError>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let commits: BTreeSet<String> = commits.into_iter().map(Into::into).collect();
        if commits.is_empty() {
            return Ok(Vec::new());
        }
        self.store.find_by_runtime_commits(&commits)
    }

    /// Servers running a nextgen revision created at or after `since`
    pub fn servers_deployed_since(&self, since: DateTime<Utc>) -> Result<Vec<Server>, TrackerError> {
        let revisions = self.repositories.runtime().revisions_since(since)?;
        debug!("{} nextgen revisions since {}", revisions.len(), since);
        self.servers_with_deployed_commit(revisions.into_iter().map(|revision| revision.commit))
    }
}
