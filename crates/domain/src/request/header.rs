//! HTTP Header types

use serde::{Deserialize, Serialize};

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    #[serde(default)]
    pub key: String,
    /// The header value (e.g., "application/json")
    #[serde(default)]
    pub value: String,
    /// Whether this header is sent
    #[serde(default = "default_active", alias = "isActive")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Header {
    /// Creates a new active header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_active: true,
        }
    }

    /// Creates a new inactive header.
    #[must_use]
    pub fn inactive(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_active: false,
        }
    }

    /// Returns true if this header goes on the wire.
    #[must_use]
    pub fn is_sendable(&self) -> bool {
        self.is_active && !self.key.trim().is_empty()
    }
}

/// An ordered collection of request headers.
///
/// Duplicate keys are kept; every active entry is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a header to the collection.
    pub fn add(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Returns an iterator over headers that are sent: active and keyed.
    pub fn active(&self) -> impl Iterator<Item = &Header> {
        self.items.iter().filter(|h| h.is_sendable())
    }

    /// Returns true if an active header with this name exists (case-insensitive).
    #[must_use]
    pub fn contains_active(&self, name: &str) -> bool {
        self.active()
            .any(|h| h.key.trim().eq_ignore_ascii_case(name))
    }

    /// Returns all headers (active and inactive).
    #[must_use]
    pub fn all(&self) -> &[Header] {
        &self.items
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
