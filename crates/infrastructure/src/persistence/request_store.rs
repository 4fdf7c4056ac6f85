//! File-based request store.
//!
//! Each saved request is one JSON file named after its id:
//! ```text
//! <data-dir>/
//!   requests/
//!     0193a5b2-....json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use courier_application::ports::{RequestStore, RequestStoreError};
use courier_domain::{DomainError, RequestId, SavedRequest};
use tokio::fs;

use super::files::{read_if_exists, write_new_atomic};
use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

fn serialization_error(e: SerializationError) -> RequestStoreError {
    RequestStoreError::Serialization(e.to_string())
}

/// Request store keeping one file per request.
#[derive(Debug, Clone)]
pub struct FileRequestStore {
    dir: PathBuf,
}

impl FileRequestStore {
    /// Creates a store in the given data directory.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("requests"),
        }
    }

    /// Returns the file path for a request id.
    ///
    /// Ids are restricted to ASCII letters, digits, `-` and `_` so they can
    /// never escape the requests directory.
    fn request_path(&self, id: &str) -> Result<PathBuf, RequestStoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::InvalidIdentifier(id.to_string()).into());
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Lists all saved requests, sorted by name.
    ///
    /// # Errors
    /// Returns an error if the directory or a request file cannot be read.
    pub async fn list(&self) -> Result<Vec<SavedRequest>, RequestStoreError> {
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut requests = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read(&path).await?;
                let request =
                    from_json_bytes::<SavedRequest>(&content).map_err(serialization_error)?;
                requests.push(request);
            }
        }
        requests.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(requests)
    }
}

#[async_trait]
impl RequestStore for FileRequestStore {
    async fn resolve(&self, id: &str) -> Result<SavedRequest, RequestStoreError> {
        let path = self.request_path(id)?;
        let Some(content) = read_if_exists(&path).await? else {
            return Err(RequestStoreError::NotFound(id.to_string()));
        };
        from_json_bytes(&content).map_err(serialization_error)
    }

    async fn create(&self, request: SavedRequest) -> Result<RequestId, RequestStoreError> {
        let path = self.request_path(&request.id)?;
        let content = to_json_stable_bytes(&request).map_err(serialization_error)?;

        match write_new_atomic(&path, &content).await {
            Ok(()) => Ok(request.id),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(RequestStoreError::AlreadyExists(request.id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
