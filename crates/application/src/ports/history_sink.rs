//! History sink port

use async_trait::async_trait;
use courier_domain::HistoryRecord;

/// Errors that can occur while recording history.
#[derive(Debug, thiserror::Error)]
pub enum HistorySinkError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Receives one record per execution.
///
/// The executor treats recording as best-effort: a failing sink is logged
/// and never changes the execution outcome.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Stores a history record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be persisted.
    async fn record(&self, record: HistoryRecord) -> Result<(), HistorySinkError>;
}
