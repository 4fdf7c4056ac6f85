//! Shared mocks for use case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courier_domain::{RequestId, SavedRequest};

use crate::ports::{Clock, RequestStore, RequestStoreError};

/// Clock stuck at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Request store backed by a map.
#[derive(Default)]
pub struct InMemoryRequestStore {
    requests: Mutex<HashMap<RequestId, SavedRequest>>,
}

impl InMemoryRequestStore {
    #[allow(clippy::unwrap_used)]
    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl RequestStore for InMemoryRequestStore {
    async fn resolve(&self, id: &str) -> Result<SavedRequest, RequestStoreError> {
        self.requests
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RequestStoreError::NotFound(id.to_string()))
    }

    async fn create(&self, request: SavedRequest) -> Result<RequestId, RequestStoreError> {
        let mut requests = self.requests.lock().unwrap();
        if requests.contains_key(&request.id) {
            return Err(RequestStoreError::AlreadyExists(request.id));
        }
        let id = request.id.clone();
        requests.insert(id.clone(), request);
        Ok(id)
    }
}
