//! Application error types

use courier_domain::DomainError;
use thiserror::Error;

use crate::ports::RequestStoreError;

/// Application-level errors.
///
/// Execution failures are not errors at this level; they are part of the
/// [`courier_domain::ExecutionOutcome`] returned by the executor.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RequestStoreError> for ApplicationError {
    fn from(error: RequestStoreError) -> Self {
        match error {
            RequestStoreError::NotFound(id) => Self::NotFound(id),
            RequestStoreError::Invalid(e) => Self::Domain(e),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
