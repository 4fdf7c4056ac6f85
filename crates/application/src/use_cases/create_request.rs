//! Create request use case.

use std::sync::Arc;

use courier_domain::request::RequestDescriptor;
use courier_domain::{DomainError, SavedRequest};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::{Clock, RequestStore};

/// Input for creating a new request.
#[derive(Debug, Clone)]
pub struct CreateRequestInput {
    /// Name of the request.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// What to send.
    pub descriptor: RequestDescriptor,
}

/// Output from creating a request.
#[derive(Debug, Clone)]
pub struct CreateRequestOutput {
    /// The saved request, id included.
    pub request: SavedRequest,
}

/// Use case for storing a new request.
pub struct CreateRequest<S: RequestStore + ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: RequestStore + ?Sized> CreateRequest<S> {
    /// Creates a new `CreateRequest` use case.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Stores the request under a fresh id.
    ///
    /// # Errors
    /// - Returns error if the name is blank
    /// - Returns error if the store rejects the request
    pub async fn execute(
        &self,
        input: CreateRequestInput,
    ) -> ApplicationResult<CreateRequestOutput> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(
                DomainError::InvalidName("request name must not be empty".to_string()).into(),
            );
        }

        let mut request = SavedRequest::from_descriptor(name, input.descriptor, self.clock.now());
        if let Some(description) = input.description.filter(|d| !d.trim().is_empty()) {
            request = request.with_description(description);
        }

        let id = self.store.create(request.clone()).await?;
        info!(request_id = %id, name = %request.name, "request saved");

        Ok(CreateRequestOutput { request })
    }
}
