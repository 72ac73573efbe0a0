//! Version-control repositories
//!
//! The tracker only reads from repositories: it resolves a commit hash to
//! a [`Revision`] and lists revisions made after a point in time. Keeping
//! the checkouts up to date is someone else's job.

pub mod history;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::TrackerError;
use crate::models::revision::Revision;

/// Name of the nextgen runtime repository
pub const NEXTGEN_REPOSITORY: &str = "nextgen";

/// Name of the plugin bundle repository
pub const PLUGINS_REPOSITORY: &str = "plugins";

/// Read access to a repository's history
///
/// Implementations are shared between callers and must tolerate concurrent
/// reads. Lookups are expected to be cheap, i.e. served from history that
/// has already been fetched.
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// Revision with the given commit hash
    fn revision(&self, commit: &str) -> Result<Option<Revision>, TrackerError>;

    /// Revisions created at or after `since`
    fn revisions_since(&self, since: DateTime<Utc>) -> Result<Vec<Revision>, TrackerError>;
}

/// Repositories known to the tracker
pub struct RepositoryRegistry {
    runtime: Arc<dyn Repository>,
    repositories: HashMap<String, Arc<dyn Repository>>,
    packages: HashMap<String, String>,
}

impl RepositoryRegistry {
    /// Create a registry around the nextgen runtime repository
    pub fn new(runtime: Arc<dyn Repository>) -> Self {
        Self {
            runtime,
            repositories: HashMap::new(),
            packages: HashMap::new(),
        }
    }

    /// Register a repository by name
    ///
    /// Registering under [`NEXTGEN_REPOSITORY`] replaces the runtime repository.
    pub fn register(&mut self, name: impl Into<String>, repository: Arc<dyn Repository>) -> &mut Self {
        let name = name.into();
        if name == NEXTGEN_REPOSITORY {
            self.runtime = repository;
        } else {
            self.repositories.insert(name, repository);
        }
        self
    }

    /// Record that `package` is built from the repository called `repository`
    pub fn map_package(&mut self, package: impl Into<String>, repository: impl Into<String>) -> &mut Self {
        self.packages.insert(package.into(), repository.into());
        self
    }

    /// The nextgen runtime repository
    pub fn runtime(&self) -> Arc<dyn Repository> {
        self.runtime.clone()
    }

    /// Repository by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Repository>> {
        if name == NEXTGEN_REPOSITORY {
            return Some(self.runtime());
        }
        self.repositories.get(name).cloned()
    }

    /// Repository a package is built from
    ///
    /// Uses the explicit package mapping if there is one, otherwise a
    /// repository registered under the package's own name. The runtime
    /// repository is only reachable through an explicit mapping; a package
    /// named "nextgen" does not resolve to it.
    pub fn for_package(&self, package: &str) -> Option<Arc<dyn Repository>> {
        match self.packages.get(package) {
            Some(name) => self.get(name),
            None => self.repositories.get(package).cloned(),
        }
    }

    /// Names of all registered repositories, runtime included
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.repositories.keys().cloned().collect();
        names.push(NEXTGEN_REPOSITORY.to_string());
        names.sort();
        names
    }
}
