//! Deploy report models
//!
//! A deploy report is generated by the nextgen tooling on a server's box and
//! reported by the server at startup. Its shape is controlled by the
//! producer, so both sections are kept as raw JSON and only the paths the
//! tracker needs are read out of them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TrackerError;

/// Snapshot of what a server's deployment tooling reported
///
/// Reports are never edited after they are attached to a server. A newer
/// report replaces the old one as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentReport {
    /// Resolved nextgen runtime version, expected to contain `version.commit`
    #[serde(rename = "nextgen", default)]
    runtime_version: Value,

    /// Package name -> reported version info, expected to contain `commit`
    #[serde(default)]
    packages: BTreeMap<String, Value>,
}

impl DeploymentReport {
    /// Create a report from its two sections
    pub fn new(runtime_version: Value, packages: BTreeMap<String, Value>) -> Self {
        Self {
            runtime_version,
            packages,
        }
    }

    /// Parse the `deploy.json` manifest reported by a server
    pub fn parse(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw runtime version data
    fn runtime_version(&self) -> &Value {
        &self.runtime_version
    }

    /// Raw version info for a package
    fn package(&self, name: &str) -> Option<&Value> {
        self.packages.get(name)
    }

    /// Names of every reported package
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Runtime commit, or `None` if the runtime data is incomplete
    pub fn runtime_commit(&self) -> Option<&str> {
        self.runtime_version
            .get("version")
            .and_then(|version| version.get("commit"))
            .and_then(Value::as_str)
    }

    /// Runtime commit, failing if the runtime data is incomplete
    ///
    /// A report without `version.commit` is corrupt rather than merely
    /// incomplete, so callers asking for the runtime commit get an error
    /// instead of `None`.
    pub fn require_runtime_commit(&self) -> Result<&str, TrackerError> {
        let version = self.runtime_version.get("version").ok_or_else(|| {
            TrackerError::MalformedReport("runtime data has no 'version' entry".to_string())
        })?;

        version
            .get("commit")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                TrackerError::MalformedReport("runtime version has no 'commit' entry".to_string())
            })
    }

    /// Commit reported for a package, if any
    pub fn package_commit(&self, name: &str) -> Option<&str> {
        self.package(name)
            .and_then(|info| info.get("commit"))
            .and_then(Value::as_str)
    }
}
