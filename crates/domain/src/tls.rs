//! TLS policy for outbound requests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// TLS configuration for HTTP requests.
///
/// Certificate verification is on unless explicitly turned off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TlsPolicy {
    /// Whether to verify server certificates.
    #[serde(default = "default_true")]
    pub verify_certificates: bool,

    /// Additional PEM-encoded CA certificates to trust.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ca_certificates: Vec<PathBuf>,

    /// Minimum TLS version (default: library default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tls_version: Option<TlsVersion>,
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            verify_certificates: true,
            ca_certificates: Vec::new(),
            min_tls_version: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

impl TlsPolicy {
    /// Creates a policy with certificate verification enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy that accepts any certificate.
    /// WARNING: This should only be used against development servers!
    #[must_use]
    pub fn insecure() -> Self {
        Self {
            verify_certificates: false,
            ..Default::default()
        }
    }

    /// Adds a CA certificate from a PEM file.
    #[must_use]
    pub fn with_ca_pem_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_certificates.push(path.into());
        self
    }

    /// Returns the insecure options in use.
    #[must_use]
    pub fn security_warnings(&self) -> Vec<TlsSecurityWarning> {
        let mut warnings = vec![];

        if !self.verify_certificates {
            warnings.push(TlsSecurityWarning::CertificateVerificationDisabled);
        }

        if matches!(
            self.min_tls_version,
            Some(TlsVersion::Tls1_0 | TlsVersion::Tls1_1)
        ) {
            warnings.push(TlsSecurityWarning::LegacyProtocolAllowed);
        }

        warnings
    }

    /// Check if this is a secure configuration.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.security_warnings().is_empty()
    }
}

/// TLS protocol versions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TlsVersion {
    /// TLS 1.0 (deprecated)
    #[serde(rename = "1.0")]
    Tls1_0,
    /// TLS 1.1 (deprecated)
    #[serde(rename = "1.1")]
    Tls1_1,
    /// TLS 1.2
    #[serde(rename = "1.2")]
    Tls1_2,
    /// TLS 1.3
    #[serde(rename = "1.3")]
    Tls1_3,
}

/// Insecure TLS settings worth surfacing to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsSecurityWarning {
    /// Server certificates are not verified.
    CertificateVerificationDisabled,
    /// TLS 1.0/1.1 are allowed.
    LegacyProtocolAllowed,
}

impl TlsSecurityWarning {
    /// Returns the warning text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CertificateVerificationDisabled => {
                "SSL certificate verification is disabled; self-signed and expired certificates will be accepted"
            }
            Self::LegacyProtocolAllowed => "TLS 1.0/1.1 are allowed; these versions are deprecated",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_secure() {
        let policy = TlsPolicy::default();
        assert!(policy.verify_certificates);
        assert!(policy.is_secure());
    }

    #[test]
    fn test_insecure_reports_warning() {
        let policy = TlsPolicy::insecure();
        assert_eq!(
            policy.security_warnings(),
            vec![TlsSecurityWarning::CertificateVerificationDisabled]
        );
    }

    #[test]
    fn test_legacy_protocol_warning() {
        let policy = TlsPolicy {
            min_tls_version: Some(TlsVersion::Tls1_1),
            ..TlsPolicy::default()
        };
        assert!(!policy.is_secure());
    }

    #[test]
    fn test_missing_fields_deserialize_to_secure_defaults() {
        let policy: TlsPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, TlsPolicy::default());
    }
}
