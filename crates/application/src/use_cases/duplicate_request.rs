//! Duplicate request use case.

use std::sync::Arc;

use courier_domain::RequestId;
use tracing::info;

use crate::ApplicationResult;
use crate::ports::{Clock, RequestStore};

/// Use case for copying a saved request under a new id.
pub struct DuplicateRequest<S: RequestStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: RequestStore + ?Sized> DuplicateRequest<S> {
    /// Creates a new `DuplicateRequest` use case.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Duplicates the request and returns the new id.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the id is unknown.
    pub async fn execute(&self, id: &str) -> ApplicationResult<RequestId> {
        let new_id = self.store.duplicate(id, self.clock.now()).await?;
        info!(source_id = %id, request_id = %new_id, "request duplicated");
        Ok(new_id)
    }
}
