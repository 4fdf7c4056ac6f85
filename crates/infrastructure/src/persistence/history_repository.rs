//! Request history persistence.
//!
//! History is one JSON file, newest record first, trimmed to the configured
//! limit on every write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use courier_application::ports::{HistorySink, HistorySinkError};
use courier_domain::{HistoryRecord, RequestHistory};
use tokio::sync::Mutex;
use tracing::debug;

use super::files::{read_if_exists, write_atomic};
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for history operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

impl From<HistoryError> for HistorySinkError {
    fn from(error: HistoryError) -> Self {
        match error {
            HistoryError::Io(e) => Self::Io(e),
            HistoryError::Serialization(e) => Self::Serialization(e.to_string()),
        }
    }
}

/// History stored in `<data-dir>/history.json`.
///
/// Writes are serialized through a lock so concurrent executions never lose
/// each other's records.
#[derive(Debug)]
pub struct FileHistoryRepository {
    path: PathBuf,
    limit: usize,
    lock: Mutex<()>,
}

impl FileHistoryRepository {
    /// Creates a repository in the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path, limit: usize) -> Self {
        Self {
            path: data_dir.join("history.json"),
            limit,
            lock: Mutex::new(()),
        }
    }

    /// Returns the path of the history file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads request history from disk.
    ///
    /// Returns empty history if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<RequestHistory, HistoryError> {
        let mut history = match read_if_exists(&self.path).await? {
            Some(content) => from_json_bytes::<RequestHistory>(&content)?,
            None => RequestHistory::new(self.limit),
        };
        history.set_max_entries(self.limit);
        Ok(history)
    }

    async fn save(&self, history: &RequestHistory) -> Result<(), HistoryError> {
        let content = to_json_stable_bytes(history)?;
        write_atomic(&self.path, &content).await?;
        Ok(())
    }

    /// Returns up to `limit` newest records.
    ///
    /// # Errors
    /// Returns an error if the history cannot be loaded.
    pub async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let history = self.load().await?;
        Ok(history.recent(limit).cloned().collect())
    }

    /// Returns the record with this id.
    ///
    /// # Errors
    /// Returns an error if the history cannot be loaded.
    pub async fn get(&self, id: &str) -> Result<Option<HistoryRecord>, HistoryError> {
        let history = self.load().await?;
        Ok(history.get(id).cloned())
    }

    /// Deletes one record, returning whether it existed.
    ///
    /// # Errors
    /// Returns an error if the history cannot be loaded or saved.
    pub async fn remove(&self, id: &str) -> Result<bool, HistoryError> {
        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        let removed = history.remove(id).is_some();
        if removed {
            self.save(&history).await?;
        }
        Ok(removed)
    }

    /// Deletes every record.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        history.clear();
        self.save(&history).await
    }

    async fn append(&self, record: HistoryRecord) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut history = self.load().await?;
        history.add(record);
        self.save(&history).await
    }
}

#[async_trait]
impl HistorySink for FileHistoryRepository {
    async fn record(&self, record: HistoryRecord) -> Result<(), HistorySinkError> {
        let id = record.id.clone();
        self.append(record).await?;
        debug!(history_id = %id, path = %self.path.display(), "history record written");
        Ok(())
    }
}
