//! Transport error classification.
//!
//! `reqwest` exposes a few coarse flags plus a chain of source errors from
//! hyper, rustls and the OS. Classification looks at both and applies the
//! rules in priority order; the first match wins.

use std::error::Error as _;

use courier_application::ports::TransportError;

/// What classification needs to know about a failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSignals {
    /// The request could not be built.
    pub builder: bool,
    /// The response body could not be decoded.
    pub decode: bool,
    /// The client gave up waiting.
    pub timeout: bool,
    /// The redirect policy stopped the request.
    pub redirect: bool,
    /// An I/O error in the chain reported malformed data.
    pub invalid_data: bool,
    /// The failure happened while reading the body of a received response.
    pub reading_body: bool,
    /// Underlying error text, outermost first, joined with `": "`.
    pub text: String,
}

impl ErrorSignals {
    /// Extracts the signals from a `reqwest` error.
    ///
    /// The URL is left out of the matched text so a host name can never
    /// look like an error marker.
    #[must_use]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let mut parts = Vec::new();
        let mut invalid_data = false;
        let mut source = error.source();
        while let Some(inner) = source {
            parts.push(inner.to_string());
            invalid_data |= inner
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::InvalidData);
            source = inner.source();
        }
        if parts.is_empty() {
            parts.push(error.to_string());
        }

        Self {
            builder: error.is_builder(),
            decode: error.is_decode(),
            timeout: error.is_timeout(),
            redirect: error.is_redirect(),
            invalid_data,
            reading_body: false,
            text: parts.join(": "),
        }
    }

    /// Marks the failure as happening after the response head arrived.
    #[must_use]
    pub fn while_reading_body(mut self) -> Self {
        self.reading_body = true;
        self
    }
}

const ENCODING_MARKERS: &[&str] = &[
    "decompress",
    "content-encoding",
    "invalid gzip header",
    "corrupt deflate stream",
    "brotli",
];

const CERTIFICATE_MARKERS: &[&str] = &[
    "invalid peer certificate",
    "unknownissuer",
    "unknown issuer",
    "certificate expired",
    "expired",
    "self signed",
    "self-signed",
    "notvalidforname",
    "not valid for name",
    "certificate verify failed",
];

const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "no such host",
    "name or service not known",
    "nodename nor servname",
    "name resolution",
    "no address associated",
];

const REFUSED_MARKERS: &[&str] = &[
    "connection refused",
    "connection reset",
    "network is unreachable",
    "host is unreachable",
    "no route to host",
];

const TIMEOUT_MARKERS: &[&str] = &["timed out", "deadline has elapsed"];

const HANDSHAKE_MARKERS: &[&str] = &[
    "handshake",
    "protocol version",
    "protocolversion",
    "no cipher suites",
    "peer is incompatible",
    "peerincompatible",
];

const PEER_CERTIFICATE_MARKERS: &[&str] = &[
    "badcertificate",
    "bad certificate",
    "certificaterequired",
    "certificate required",
    "unsupportedcertificate",
    "certificaterevoked",
    "peer certificate",
];

const LOCAL_TLS_MARKERS: &[&str] = &[
    "client certificate",
    "private key",
    "pem file",
    "invalid pem",
    "root certificate",
    "no valid certificates",
];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

/// Classifies a failed attempt.
///
/// Build failures come first since they are not transport failures at all.
/// A decode failure is an encoding problem only when the decompressor
/// rejected the data; a body cut short or reset is a plain connection error.
/// Once a response has arrived, DNS and refused rows no longer apply.
#[must_use]
pub fn classify(signals: &ErrorSignals, redirect_limit: usize) -> TransportError {
    let raw = signals.text.clone();
    let text = signals.text.to_lowercase();
    let establishing = !signals.reading_body;

    if signals.builder {
        TransportError::Build(raw)
    } else if (signals.decode && signals.invalid_data) || contains_any(&text, ENCODING_MARKERS) {
        TransportError::ContentEncoding(raw)
    } else if contains_any(&text, CERTIFICATE_MARKERS) {
        TransportError::CertificateVerification(raw)
    } else if establishing && contains_any(&text, DNS_MARKERS) {
        TransportError::DnsResolution(raw)
    } else if establishing && contains_any(&text, REFUSED_MARKERS) {
        TransportError::ConnectionRefused(raw)
    } else if signals.timeout || contains_any(&text, TIMEOUT_MARKERS) {
        TransportError::Timeout
    } else if contains_any(&text, HANDSHAKE_MARKERS) {
        TransportError::TlsHandshake(raw)
    } else if contains_any(&text, PEER_CERTIFICATE_MARKERS) {
        TransportError::PeerCertificate(raw)
    } else if contains_any(&text, LOCAL_TLS_MARKERS) {
        TransportError::LocalCertificate(raw)
    } else if signals.redirect {
        TransportError::TooManyRedirects {
            limit: redirect_limit,
        }
    } else {
        TransportError::Other(raw)
    }
}

/// Classifies a `reqwest` error raised before a response arrived.
#[must_use]
pub fn classify_reqwest(error: &reqwest::Error, redirect_limit: usize) -> TransportError {
    classify(&ErrorSignals::from_reqwest(error), redirect_limit)
}

/// Classifies a `reqwest` error raised while reading a response body.
#[must_use]
pub fn classify_body_error(error: &reqwest::Error, redirect_limit: usize) -> TransportError {
    classify(
        &ErrorSignals::from_reqwest(error).while_reading_body(),
        redirect_limit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(text: &str) -> ErrorSignals {
        ErrorSignals {
            text: text.to_string(),
            ..ErrorSignals::default()
        }
    }

    #[test]
    fn test_dns_failure() {
        let signals = text(
            "client error (Connect): dns error: failed to lookup address information: Name or service not known",
        );
        assert!(matches!(classify(&signals, 5), TransportError::DnsResolution(_)));
    }

    #[test]
    fn test_connection_refused() {
        let signals =
            text("client error (Connect): tcp connect error: Connection refused (os error 111)");
        assert_eq!(
            classify(&signals, 5),
            TransportError::ConnectionRefused(signals.text.clone())
        );
    }

    #[test]
    fn test_certificate_verification() {
        let signals = text(
            "client error (Connect): invalid peer certificate: UnknownIssuer",
        );
        assert!(matches!(
            classify(&signals, 5),
            TransportError::CertificateVerification(_)
        ));

        let expired = text("invalid peer certificate: Expired");
        assert!(matches!(
            classify(&expired, 5),
            TransportError::CertificateVerification(_)
        ));
    }

    #[test]
    fn test_timeout_flag_and_text() {
        let flagged = ErrorSignals {
            timeout: true,
            ..ErrorSignals::default()
        };
        assert_eq!(classify(&flagged, 5), TransportError::Timeout);
        assert_eq!(
            classify(&text("operation timed out"), 5),
            TransportError::Timeout
        );
    }

    #[test]
    fn test_tls_rows() {
        assert!(matches!(
            classify(&text("received fatal alert: HandshakeFailure"), 5),
            TransportError::TlsHandshake(_)
        ));
        assert!(matches!(
            classify(&text("received fatal alert: BadCertificate"), 5),
            TransportError::PeerCertificate(_)
        ));
        assert!(matches!(
            classify(&text("failed to load client certificate"), 5),
            TransportError::LocalCertificate(_)
        ));
    }

    #[test]
    fn test_content_encoding_wins_over_everything() {
        let signals = ErrorSignals {
            decode: true,
            timeout: true,
            text: "error decoding response body: invalid gzip header".to_string(),
            ..ErrorSignals::default()
        };
        assert!(matches!(
            classify(&signals, 5),
            TransportError::ContentEncoding(_)
        ));
    }

    #[test]
    fn test_rejected_compressed_data_is_content_encoding() {
        let signals = ErrorSignals {
            decode: true,
            invalid_data: true,
            reading_body: true,
            text: "corrupt stream".to_string(),
            ..ErrorSignals::default()
        };
        assert!(matches!(
            classify(&signals, 5),
            TransportError::ContentEncoding(_)
        ));
    }

    #[test]
    fn test_truncated_body_is_a_connection_error() {
        let signals = ErrorSignals {
            decode: true,
            text: "error reading a body from connection: end of file before message length reached"
                .to_string(),
            ..ErrorSignals::default()
        }
        .while_reading_body();

        let error = classify(&signals, 5);
        assert!(matches!(error, TransportError::Other(_)));
        assert!(error.to_string().starts_with("Connection error: "));
    }

    #[test]
    fn test_reset_while_reading_body_is_not_retryable() {
        let signals = ErrorSignals {
            decode: true,
            text: "error reading a body from connection: Connection reset by peer (os error 104)"
                .to_string(),
            ..ErrorSignals::default()
        }
        .while_reading_body();

        let error = classify(&signals, 5);
        assert!(matches!(error, TransportError::Other(_)));
        assert!(!error.is_connection_establishment());
    }

    #[test]
    fn test_certificate_wins_over_dns_and_refused() {
        let signals = text("invalid peer certificate: UnknownIssuer; connection reset");
        assert!(matches!(
            classify(&signals, 5),
            TransportError::CertificateVerification(_)
        ));
    }

    #[test]
    fn test_redirect_limit() {
        let signals = ErrorSignals {
            redirect: true,
            text: "too many redirects".to_string(),
            ..ErrorSignals::default()
        };
        assert_eq!(
            classify(&signals, 5),
            TransportError::TooManyRedirects { limit: 5 }
        );
    }

    #[test]
    fn test_builder_error_is_internal() {
        let signals = ErrorSignals {
            builder: true,
            text: "invalid HTTP header name".to_string(),
            ..ErrorSignals::default()
        };
        assert_eq!(
            classify(&signals, 5),
            TransportError::Build("invalid HTTP header name".to_string())
        );
    }

    #[test]
    fn test_fallback_keeps_raw_text() {
        let signals = text("connection closed before message completed");
        let error = classify(&signals, 5);
        assert_eq!(
            error.to_string(),
            "Connection error: connection closed before message completed"
        );
    }
}
