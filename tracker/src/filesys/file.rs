//! JSON files read and written by the tracker

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::TrackerError;

/// A settings or server records file
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Read and parse the file
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, TrackerError> {
        let contents = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write `value` as pretty JSON, creating parent directories as needed
    pub async fn write_json<T: Serialize>(&self, value: &T) -> Result<(), TrackerError> {
        let contents = serde_json::to_string_pretty(value)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, contents).await?;
        Ok(())
    }
}
