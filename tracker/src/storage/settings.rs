//! Settings file management

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::deployment::{BUNGEECORD_PACKAGE, PLUGINS_PACKAGE, SPORTBUKKIT_PACKAGE};
use crate::errors::TrackerError;
use crate::logs::LogLevel;
use crate::repository::history::HistoryRepository;
use crate::repository::{RepositoryRegistry, NEXTGEN_REPOSITORY, PLUGINS_REPOSITORY};
use crate::storage::layout::StorageLayout;

/// Tracker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub json_logs: bool,

    /// Directory holding the repository checkouts
    #[serde(default = "default_repository_base_path")]
    pub repository_base_path: PathBuf,

    /// JSON file holding the server records
    #[serde(default = "default_servers_file")]
    pub servers_file: PathBuf,

    /// Repositories to load
    #[serde(default = "default_repositories")]
    pub repositories: Vec<RepositorySettings>,
}

fn default_repository_base_path() -> PathBuf {
    PathBuf::from("/repo")
}

fn default_servers_file() -> PathBuf {
    StorageLayout::default().servers_file().path().to_path_buf()
}

fn default_repositories() -> Vec<RepositorySettings> {
    vec![
        RepositorySettings::new(NEXTGEN_REPOSITORY, &[]),
        RepositorySettings::new(PLUGINS_REPOSITORY, &[PLUGINS_PACKAGE]),
        RepositorySettings::new(SPORTBUKKIT_PACKAGE, &[SPORTBUKKIT_PACKAGE]),
        RepositorySettings::new(BUNGEECORD_PACKAGE, &[BUNGEECORD_PACKAGE]),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            json_logs: false,
            repository_base_path: default_repository_base_path(),
            servers_file: default_servers_file(),
            repositories: default_repositories(),
        }
    }
}

impl Settings {
    /// Check the settings can be used to build a registry
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !self.repositories.iter().any(|r| r.name == NEXTGEN_REPOSITORY) {
            return Err(TrackerError::ConfigError(format!(
                "No '{}' repository configured",
                NEXTGEN_REPOSITORY
            )));
        }
        Ok(())
    }

    /// Load the history of every configured repository
    ///
    /// Repositories other than nextgen that fail to load are skipped with a
    /// warning; their packages then resolve to no revision.
    pub async fn load_repositories(&self) -> Result<RepositoryRegistry, TrackerError> {
        self.validate()?;

        let mut runtime = None;
        let mut others = Vec::new();
        for repository in &self.repositories {
            let checkout = repository.checkout(&self.repository_base_path);
            if repository.name == NEXTGEN_REPOSITORY {
                runtime = Some(HistoryRepository::load(&repository.name, &checkout).await?);
                continue;
            }
            match HistoryRepository::load(&repository.name, &checkout).await {
                Ok(history) => others.push((repository, history)),
                Err(e) => warn!("Skipping repository {}: {}", repository.name, e),
            }
        }

        let runtime = runtime.ok_or_else(|| {
            TrackerError::ConfigError(format!("No '{}' repository configured", NEXTGEN_REPOSITORY))
        })?;
        let mut registry = RepositoryRegistry::new(Arc::new(runtime));
        for (settings, history) in others {
            registry.register(settings.name.clone(), Arc::new(history));
            for package in &settings.packages {
                registry.map_package(package.clone(), settings.name.clone());
            }
        }
        Ok(registry)
    }
}

/// A repository checkout to read history from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    /// Registry name
    pub name: String,

    /// Checkout location. Defaults to `<repository_base_path>/<name>`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Packages built from this repository
    #[serde(default)]
    pub packages: Vec<String>,
}

impl RepositorySettings {
    fn new(name: &str, packages: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            packages: packages.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Checkout location
    pub fn checkout(&self, repository_base_path: &Path) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => repository_base_path.join(&self.name),
        }
    }
}
