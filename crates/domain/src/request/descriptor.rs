//! Request descriptor: the input shape of one execution.

use serde::{Deserialize, Serialize};

use super::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody};

/// Everything needed to execute one HTTP request.
///
/// The descriptor is kept exactly as authored, inactive entries included,
/// so it can be recorded to history and replayed later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// Request headers, in authored order
    #[serde(default)]
    pub headers: Headers,
    /// Query parameters appended to the URL
    #[serde(default, alias = "params", alias = "queryParams")]
    pub query_params: QueryParams,
    /// Optional request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    /// Creates a descriptor with no headers, params or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            query_params: QueryParams::new(),
            body: None,
        }
    }

    /// Creates a GET descriptor.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.add(header);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, param: QueryParam) -> Self {
        self.query_params.add(param);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the body only if it has content to send.
    #[must_use]
    pub fn payload(&self) -> Option<&RequestBody> {
        self.body.as_ref().filter(|b| !b.is_empty())
    }
}
