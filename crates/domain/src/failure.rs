//! Execution failure taxonomy.
//!
//! Every way an execution can end without a response maps to one
//! [`FailureKind`]. The kind drives the user-facing title and the list of
//! actionable suggestions; the message carries the classified text.

use serde::{Deserialize, Serialize};

/// Broad class of a failure, logged next to the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Rejected before dispatch.
    Validation,
    /// No HTTP response was obtained.
    Transport,
    /// Building the request failed unexpectedly.
    Internal,
    /// Aborted by the caller.
    Cancelled,
}

/// Categories of execution failures for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// URL missing, unparsable, or not http/https.
    InvalidUrl,
    /// Method outside the supported set.
    UnsupportedMethod,
    /// Unsupported or garbled content-encoding from the server.
    ContentEncoding,
    /// Server certificate did not verify (self-signed, expired, unknown issuer).
    CertificateVerification,
    /// Host name could not be resolved.
    DnsResolution,
    /// Connection refused, reset or unreachable.
    ConnectionRefused,
    /// Timeout budget exceeded.
    Timeout,
    /// TLS handshake failed for reasons other than certificate validation.
    TlsHandshake,
    /// The peer rejected our certificate or sent a bad one.
    PeerCertificate,
    /// Local TLS material (client cert, key, roots) is unusable.
    LocalCertificate,
    /// Redirect chain longer than the configured limit.
    TooManyRedirects,
    /// Any other transport fault.
    Connection,
    /// Request construction failed on JSON handling.
    MalformedJson,
    /// Request construction failed on URL handling.
    MalformedUrl,
    /// Unexpected failure while building the request.
    Internal,
    /// Cancelled through its cancellation token.
    Cancelled,
}

impl FailureCategory {
    /// Returns the lowercase name used in logs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Internal => "internal",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FailureKind {
    /// Returns the broad category of this kind.
    #[must_use]
    pub const fn category(self) -> FailureCategory {
        match self {
            Self::InvalidUrl | Self::UnsupportedMethod => FailureCategory::Validation,
            Self::MalformedJson | Self::MalformedUrl | Self::Internal => FailureCategory::Internal,
            Self::Cancelled => FailureCategory::Cancelled,
            _ => FailureCategory::Transport,
        }
    }

    /// Returns user-friendly suggestions for this failure.
    #[must_use]
    pub const fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::InvalidUrl | Self::MalformedUrl => &[
                "Check that the URL starts with http:// or https://",
                "Verify there are no typos in the URL",
            ],
            Self::UnsupportedMethod => &[
                "Use one of GET, POST, PUT, PATCH, DELETE, HEAD or OPTIONS",
            ],
            Self::ContentEncoding => &[
                "The server advertised a content-encoding it did not honor",
                "Try sending an explicit Accept-Encoding: identity header",
            ],
            Self::CertificateVerification => &[
                "This is common with self-signed certificates or local development APIs",
                "For HTTPS APIs, ensure the server has a valid SSL certificate",
                "For testing only, certificate verification can be disabled in settings",
            ],
            Self::DnsResolution => &[
                "Domain name could not be resolved. Check if the URL is correct",
                "Verify your internet connection and DNS settings",
            ],
            Self::ConnectionRefused | Self::Connection => &[
                "Check if the server is running",
                "Verify the port number and protocol (HTTP/HTTPS) are correct",
                "Check your firewall settings",
            ],
            Self::Timeout => &[
                "The server may be slow or unresponsive",
                "Try increasing the timeout value or check server status",
            ],
            Self::TlsHandshake | Self::PeerCertificate => &[
                "Check the server's SSL/TLS configuration",
                "Verify the server supports TLS 1.2 or newer",
            ],
            Self::LocalCertificate => &[
                "Check the local SSL certificate and key configuration",
                "Verify the certificate files are readable and in PEM format",
            ],
            Self::TooManyRedirects => &[
                "The server may have a redirect loop",
                "Try the final URL directly",
            ],
            Self::MalformedJson => &["Check that the JSON syntax is valid"],
            Self::Internal => &[
                "Check the URL format and ensure the API endpoint is accessible",
                "Verify network connectivity and try again",
            ],
            Self::Cancelled => &["Request was cancelled"],
        }
    }

    /// Returns a human-readable title for this failure.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::UnsupportedMethod => "Unsupported Method",
            Self::ContentEncoding => "Content Encoding Error",
            Self::CertificateVerification => "SSL Certificate Error",
            Self::DnsResolution => "DNS Resolution Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::Timeout => "Request Timeout",
            Self::TlsHandshake => "SSL Connect Error",
            Self::PeerCertificate => "SSL Peer Certificate Error",
            Self::LocalCertificate => "Local SSL Certificate Error",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Connection => "Connection Error",
            Self::MalformedJson => "Malformed JSON",
            Self::MalformedUrl => "Malformed URL",
            Self::Internal => "Unexpected Error",
            Self::Cancelled => "Request Cancelled",
        }
    }

    /// Classifies a non-transport error message by substring.
    ///
    /// Returns the kind and the message to show; unmatched messages are
    /// passed through verbatim.
    #[must_use]
    pub fn classify_message(message: &str) -> (Self, String) {
        let lower = message.to_lowercase();
        if lower.contains("timed out") || lower.contains("timeout") {
            (Self::Timeout, "Request timed out.".to_string())
        } else if lower.contains("json") {
            (Self::MalformedJson, format!("Malformed JSON: {message}"))
        } else if lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == "url" || word == "uri")
        {
            (Self::MalformedUrl, format!("Malformed URL: {message}"))
        } else {
            (Self::Internal, message.to_string())
        }
    }
}

/// A classified execution failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    /// Failure category for display and suggestions.
    pub kind: FailureKind,
    /// Classified, human-readable message.
    pub message: String,
    /// Underlying error text, when it adds information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Wall-clock time until the failure was known.
    pub elapsed_ms: u64,
}

impl ExecutionFailure {
    /// Creates a failure with a classified message.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            elapsed_ms,
        }
    }

    /// Creates a failure from an internal error message, classifying it.
    #[must_use]
    pub fn internal(raw: &str, elapsed_ms: u64) -> Self {
        let (kind, message) = FailureKind::classify_message(raw);
        let details = (message != raw).then(|| raw.to_string());
        Self {
            kind,
            message,
            details,
            elapsed_ms,
        }
    }

    /// Attaches technical details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Returns the suggestions for this failure's kind.
    #[must_use]
    pub const fn suggestions(&self) -> &'static [&'static str] {
        self.kind.suggestions()
    }
}

impl std::fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExecutionFailure {}
