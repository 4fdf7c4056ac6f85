//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// The declared kind of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BodyType {
    /// JSON document, re-encoded as a structured payload.
    #[default]
    #[serde(rename = "json")]
    Json,
    /// Multipart form data, passed through as-is.
    #[serde(rename = "form-data")]
    FormData,
    /// URL-encoded form fields.
    #[serde(rename = "x-www-form-urlencoded")]
    FormUrlEncoded,
    /// Verbatim text sent as `text/plain`.
    #[serde(rename = "raw")]
    Raw,
    /// Opaque bytes, passed through as-is.
    #[serde(rename = "binary")]
    Binary,
}

impl BodyType {
    /// Returns true for bodies sent byte for byte (raw, form-data, binary).
    #[must_use]
    pub const fn is_verbatim(self) -> bool {
        matches!(self, Self::Raw | Self::FormData | Self::Binary)
    }

    /// Returns the wire name of the body type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::FormData => "form-data",
            Self::FormUrlEncoded => "x-www-form-urlencoded",
            Self::Raw => "raw",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "form-data" => Ok(Self::FormData),
            "x-www-form-urlencoded" => Ok(Self::FormUrlEncoded),
            "raw" => Ok(Self::Raw),
            "binary" => Ok(Self::Binary),
            other => Err(DomainError::UnsupportedBodyType(other.to_string())),
        }
    }
}

/// HTTP request body with content and type information.
///
/// A missing `type` deserializes as [`BodyType::Json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestBody {
    /// The declared body type
    #[serde(rename = "type", default)]
    pub body_type: BodyType,
    /// The body content as authored
    #[serde(default)]
    pub content: String,
}

impl RequestBody {
    /// Creates a body of the given type.
    #[must_use]
    pub fn new(body_type: BodyType, content: impl Into<String>) -> Self {
        Self {
            body_type,
            content: content.into(),
        }
    }

    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::new(BodyType::Json, content)
    }

    /// Creates a raw text body.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::new(BodyType::Raw, content)
    }

    /// Creates a URL-encoded form body.
    #[must_use]
    pub fn form_urlencoded(content: impl Into<String>) -> Self {
        Self::new(BodyType::FormUrlEncoded, content)
    }

    /// Returns whether there is nothing to send.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
