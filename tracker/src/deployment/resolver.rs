//! Resolve deployed commits to repository revisions

use std::sync::Arc;

use tracing::debug;

use crate::deployment::state::HasDeployment;
use crate::deployment::PLUGINS_PACKAGE;
use crate::errors::TrackerError;
use crate::models::revision::Revision;
use crate::repository::{RepositoryRegistry, PLUGINS_REPOSITORY};

/// Resolves what a server is running against the known repositories
#[derive(Clone)]
pub struct DeploymentResolver {
    repositories: Arc<RepositoryRegistry>,
}

impl DeploymentResolver {
    pub fn new(repositories: Arc<RepositoryRegistry>) -> Self {
        Self { repositories }
    }

    pub fn repositories(&self) -> &RepositoryRegistry {
        &self.repositories
    }

    /// Revision deployed for `package`, or for the nextgen runtime if `None`
    ///
    /// `None` if the package has no registered repository, the server has
    /// not reported a commit for it, or the repository does not know the
    /// commit. A malformed runtime report is an error, see
    /// [`DeploymentState::deployed_commit`](crate::deployment::state::DeploymentState::deployed_commit).
    pub fn deployed_revision<S>(&self, server: &S, package: Option<&str>) -> Result<Option<Revision>, TrackerError>
    where
        S: HasDeployment + ?Sized,
    {
        let repository = match package {
            None => Some(self.repositories.runtime()),
            Some(package) => self.repositories.for_package(package),
        };
        let Some(repository) = repository else {
            debug!("No repository registered for package {:?}", package);
            return Ok(None);
        };

        match server.deployed_commit(package)? {
            Some(commit) => repository.revision(commit),
            None => Ok(None),
        }
    }

    /// Revision of the server's application package
    pub fn deployed_application_revision<S>(&self, server: &S) -> Result<Option<Revision>, TrackerError>
    where
        S: HasDeployment + ?Sized,
    {
        self.deployed_revision(server, Some(server.application_package()))
    }

    /// Revision of the plugin bundle the server is running
    ///
    /// With `candidates`, returns the first candidate whose commit matches
    /// the deployed plugin commit. Without, asks the plugins repository.
    pub fn latest_plugin_revision<S>(
        &self,
        server: &S,
        candidates: Option<&[Revision]>,
    ) -> Result<Option<Revision>, TrackerError>
    where
        S: HasDeployment + ?Sized,
    {
        let Some(commit) = server.deployment().package_commit(PLUGINS_PACKAGE) else {
            return Ok(None);
        };

        match candidates {
            Some(candidates) => Ok(find_revision(candidates, commit).cloned()),
            None => match self.repositories.get(PLUGINS_REPOSITORY) {
                Some(repository) => repository.revision(commit),
                None => {
                    debug!("No plugins repository registered");
                    Ok(None)
                }
            },
        }
    }
}

/// First revision in `revisions` with the given commit
pub fn find_revision<'a>(revisions: &'a [Revision], commit: &str) -> Option<&'a Revision> {
    revisions.iter().find(|revision| revision.commit == commit)
}
