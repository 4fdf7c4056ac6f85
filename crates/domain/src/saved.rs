//! Saved requests, as kept by a request store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::{Headers, HttpMethod, QueryParams, RequestBody, RequestDescriptor};

/// Identifier of a saved request.
pub type RequestId = String;

/// A persisted HTTP request definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// Human-readable request name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning collection, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    /// Owning folder, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: String,
    /// Headers, inactive ones included.
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters, inactive ones included.
    #[serde(default)]
    pub params: QueryParams,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl SavedRequest {
    /// Creates a saved request from a descriptor.
    #[must_use]
    pub fn from_descriptor(
        name: impl Into<String>,
        descriptor: RequestDescriptor,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            name: name.into(),
            description: None,
            collection_id: None,
            folder_id: None,
            method: descriptor.method,
            url: descriptor.url,
            headers: descriptor.headers,
            params: descriptor.query_params,
            body: descriptor.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the descriptor used to execute this request.
    #[must_use]
    pub fn to_descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.clone(),
            query_params: self.params.clone(),
            body: self.body.clone(),
        }
    }

    /// Returns a copy under a new id, named `"<name> (Copy)"`.
    ///
    /// Headers, params and the body (type included) are copied as-is.
    #[must_use]
    pub fn duplicate(&self, now: DateTime<Utc>) -> Self {
        Self {
            id: crate::generate_id(),
            name: format!("{} (Copy)", self.name),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}
