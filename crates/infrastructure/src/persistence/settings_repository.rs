//! Executor settings persistence.
//!
//! Settings live in `<data-dir>/settings.json`. A missing file means
//! defaults; a partial file fills the gaps with defaults.

use std::path::{Path, PathBuf};

use courier_domain::{DomainError, ExecutorSettings};

use super::files::{read_if_exists, write_atomic};
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// The stored values are out of range.
    #[error("{0}")]
    Invalid(#[from] DomainError),
}

/// Repository for executor settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    /// Creates a repository in the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("settings.json"),
        }
    }

    /// Returns the path where settings are stored.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates settings.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed or holds invalid values.
    pub async fn load(&self) -> Result<ExecutorSettings, SettingsError> {
        let settings = match read_if_exists(&self.path).await? {
            Some(content) => from_json_bytes::<ExecutorSettings>(&content)?,
            None => ExecutorSettings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validates and saves settings.
    ///
    /// # Errors
    /// Returns an error if the values are invalid or the file cannot be written.
    pub async fn save(&self, settings: &ExecutorSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        let content = to_json_stable_bytes(settings)?;
        write_atomic(&self.path, &content).await?;
        Ok(())
    }
}
