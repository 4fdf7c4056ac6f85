//! Request store port
//!
//! Defines the interface for saved-request persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courier_domain::{DomainError, RequestId, SavedRequest};

/// Errors that can occur during request store operations.
#[derive(Debug, thiserror::Error)]
pub enum RequestStoreError {
    /// No request with this id.
    #[error("Request not found: {0}")]
    NotFound(String),

    /// A request with this id already exists.
    #[error("Request already exists: {0}")]
    AlreadyExists(String),

    /// The id or record was rejected.
    #[error("Invalid request: {0}")]
    Invalid(#[from] DomainError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for saved requests.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Loads a saved request by id.
    ///
    /// # Errors
    /// Returns `RequestStoreError::NotFound` if the id is unknown.
    async fn resolve(&self, id: &str) -> Result<SavedRequest, RequestStoreError>;

    /// Stores a new request and returns its id.
    ///
    /// # Errors
    /// Returns `RequestStoreError::AlreadyExists` if the id is taken.
    async fn create(&self, request: SavedRequest) -> Result<RequestId, RequestStoreError>;

    /// Copies a stored request under a new id, stamped with `now`, and
    /// returns that id.
    ///
    /// # Errors
    /// Returns `RequestStoreError::NotFound` if the source id is unknown.
    async fn duplicate(
        &self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<RequestId, RequestStoreError> {
        let copy = self.resolve(id).await?.duplicate(now);
        self.create(copy).await
    }
}
