//! Revision model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit in a repository's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Full commit hash
    pub commit: String,

    /// Commit timestamp
    pub created_at: DateTime<Utc>,

    /// Author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// First line of the commit message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Revision {
    /// Create a revision with only a hash and timestamp
    pub fn new(commit: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            commit: commit.into(),
            created_at,
            author: None,
            summary: None,
        }
    }
}
