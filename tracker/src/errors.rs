//! Error types for the fleet tracker

use thiserror::Error;

/// Main error type for the fleet tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A deploy report exists but its runtime data is missing `version.commit`
    #[error("Malformed deploy report: {0}")]
    MalformedReport(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
