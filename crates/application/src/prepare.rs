//! Request preparation
//!
//! Turns an authored [`RequestDescriptor`] into the exact request that goes
//! on the wire: validated URL with active query params appended, active
//! headers in order, and an encoded body with its default content type.

use courier_domain::request::{BodyType, HttpMethod, RequestBody, RequestDescriptor};
use courier_domain::{DomainError, DomainResult};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Content type for JSON bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type for URL-encoded form bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
/// Content type for raw text bodies.
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
/// Content type for binary bodies.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// A request body after encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EncodedBody {
    /// Nothing is sent.
    #[default]
    Empty,
    /// Structured JSON payload.
    Json(Value),
    /// Ordered form fields.
    Form(Vec<(String, String)>),
    /// Verbatim text.
    Text(String),
    /// Pass-through bytes.
    Bytes(Vec<u8>),
}

impl EncodedBody {
    /// Encodes a body per its declared type.
    ///
    /// Invalid JSON becomes an empty object and an unparsable form becomes an
    /// empty field list; neither is an error.
    #[must_use]
    pub fn encode(body: &RequestBody) -> Self {
        match body.body_type {
            BodyType::Json => Self::Json(serde_json::from_str(&body.content).unwrap_or_else(|e| {
                debug!(error = %e, "body is not valid JSON, sending an empty object");
                Value::Object(serde_json::Map::new())
            })),
            BodyType::FormUrlEncoded => Self::Form(
                serde_urlencoded::from_str(&body.content).unwrap_or_else(|e| {
                    debug!(error = %e, "body is not a valid form, sending no fields");
                    Vec::new()
                }),
            ),
            BodyType::Raw => Self::Text(body.content.clone()),
            BodyType::FormData | BodyType::Binary => Self::Bytes(body.content.clone().into_bytes()),
        }
    }

    /// Returns the content type sent when the user did not set one.
    #[must_use]
    pub const fn default_content_type(body_type: BodyType) -> Option<&'static str> {
        match body_type {
            BodyType::Json => Some(CONTENT_TYPE_JSON),
            BodyType::FormUrlEncoded => Some(CONTENT_TYPE_FORM),
            BodyType::Raw => Some(CONTENT_TYPE_TEXT),
            BodyType::Binary => Some(CONTENT_TYPE_OCTET_STREAM),
            BodyType::FormData => None,
        }
    }

    /// Returns true if nothing is sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The request as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL, query params included.
    pub url: Url,
    /// Headers in send order; duplicates kept.
    pub headers: Vec<(String, String)>,
    /// Encoded body.
    pub body: EncodedBody,
}

impl PreparedRequest {
    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parses and checks a request URL.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` if the URL is blank, unparsable, or not
/// http/https.
pub fn parse_url(raw: &str) -> DomainResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidUrl("URL is required".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DomainError::InvalidUrl(format!(
            "URL must use http or https, got {scheme}: {trimmed}"
        ))),
    }
}

/// Prepares a descriptor for sending.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` if the URL does not validate.
pub fn prepare(descriptor: &RequestDescriptor) -> DomainResult<PreparedRequest> {
    let mut url = parse_url(&descriptor.url)?;

    let mut params = descriptor.query_params.active().peekable();
    if params.peek().is_some() {
        let mut pairs = url.query_pairs_mut();
        for param in params {
            pairs.append_pair(param.key.trim(), &param.value);
        }
    }

    let mut headers: Vec<(String, String)> = descriptor
        .headers
        .active()
        .map(|h| (h.key.trim().to_string(), h.value.clone()))
        .collect();

    let body = match descriptor.payload() {
        Some(body) if descriptor.method.carries_payload() || body.body_type.is_verbatim() => {
            if let Some(content_type) = EncodedBody::default_content_type(body.body_type)
                && !descriptor.headers.contains_active("content-type")
            {
                headers.push(("Content-Type".to_string(), content_type.to_string()));
            }
            EncodedBody::encode(body)
        }
        _ => EncodedBody::Empty,
    };

    Ok(PreparedRequest {
        method: descriptor.method,
        url,
        headers,
        body,
    })
}
