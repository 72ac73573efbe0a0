//! In-memory repository history

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::TrackerError;
use crate::models::revision::Revision;
use crate::repository::Repository;

/// `git log` format: hash, committer date, author, subject (unit-separated)
const GIT_LOG_FORMAT: &str = "--format=%H%x1f%cI%x1f%an%x1f%s";

/// A repository backed by a fully loaded commit history
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    name: String,
    /// Newest first
    revisions: Vec<Revision>,
}

impl HistoryRepository {
    /// Create a repository from a list of revisions in any order
    pub fn new(name: impl Into<String>, mut revisions: Vec<Revision>) -> Self {
        revisions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            name: name.into(),
            revisions,
        }
    }

    /// Load history from an existing checkout by running `git log`
    pub async fn load(name: &str, checkout: &Path) -> Result<Self, TrackerError> {
        debug!("Reading history of {} from {}", name, checkout.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(checkout)
            .args(["log", GIT_LOG_FORMAT])
            .output()
            .await
            .map_err(|e| TrackerError::RepositoryError(format!("Failed to run git log: {}", e)))?;

        if !output.status.success() {
            return Err(TrackerError::RepositoryError(format!(
                "git log failed in {}: {}",
                checkout.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let revisions = parse_git_log(&String::from_utf8_lossy(&output.stdout))?;
        info!("Loaded {} revisions for repository {}", revisions.len(), name);
        Ok(Self::new(name, revisions))
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

impl Repository for HistoryRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn revision(&self, commit: &str) -> Result<Option<Revision>, TrackerError> {
        Ok(self.revisions.iter().find(|r| r.commit == commit).cloned())
    }

    fn revisions_since(&self, since: DateTime<Utc>) -> Result<Vec<Revision>, TrackerError> {
        Ok(self
            .revisions
            .iter()
            .take_while(|r| r.created_at >= since)
            .cloned()
            .collect())
    }
}

/// Parse the output of `git log` run with [`GIT_LOG_FORMAT`]
pub fn parse_git_log(output: &str) -> Result<Vec<Revision>, TrackerError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_git_log_line)
        .collect()
}

fn parse_git_log_line(line: &str) -> Result<Revision, TrackerError> {
    let mut fields = line.splitn(4, '\x1f');

    let commit = fields
        .next()
        .filter(|commit| !commit.is_empty())
        .ok_or_else(|| TrackerError::RepositoryError(format!("Missing commit hash: {:?}", line)))?;

    let created_at = fields
        .next()
        .ok_or_else(|| TrackerError::RepositoryError(format!("Missing commit date: {:?}", line)))?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|e| TrackerError::RepositoryError(format!("Invalid commit date {:?}: {}", created_at, e)))?
        .with_timezone(&Utc);

    let author = fields.next().filter(|s| !s.is_empty()).map(str::to_string);
    let summary = fields.next().filter(|s| !s.is_empty()).map(str::to_string);

    Ok(Revision {
        commit: commit.to_string(),
        created_at,
        author,
        summary,
    })
}
