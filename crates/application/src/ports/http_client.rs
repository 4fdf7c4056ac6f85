//! HTTP Client port

use std::future::Future;
use std::sync::Arc;

use courier_domain::response::ResponseSpec;
use courier_domain::{ExecutionFailure, FailureKind};
use thiserror::Error;
use tokio::sync::watch;

use crate::prepare::PreparedRequest;

/// Port for sending one prepared HTTP request.
///
/// Implementations perform a single attempt; retries and the total timeout
/// budget belong to the executor.
pub trait HttpClient: Send + Sync {
    /// Sends the request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns a classified `TransportError` when no HTTP response was
    /// obtained.
    fn send(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<ResponseSpec, TransportError>> + Send;
}

/// A failure before any HTTP response was obtained.
///
/// Variants are listed in classification priority. The payload keeps the
/// underlying error text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Unsupported or garbled content-encoding.
    #[error("Content encoding error.")]
    ContentEncoding(String),

    /// Server certificate failed verification.
    #[error("SSL certificate verification failed. The certificate may be self-signed or expired.")]
    CertificateVerification(String),

    /// Host name could not be resolved.
    #[error("Could not resolve host.")]
    DnsResolution(String),

    /// Connection refused, reset or unreachable.
    #[error("Failed to connect to server.")]
    ConnectionRefused(String),

    /// Timeout budget exceeded.
    #[error("Request timed out.")]
    Timeout,

    /// TLS handshake failed.
    #[error("SSL connect error.")]
    TlsHandshake(String),

    /// The peer certificate was rejected.
    #[error("SSL peer certificate was not OK.")]
    PeerCertificate(String),

    /// Local TLS material is unusable.
    #[error("Problem with the local SSL certificate.")]
    LocalCertificate(String),

    /// Redirect chain exceeded the limit.
    #[error("Too many redirects (limit {limit}).")]
    TooManyRedirects {
        /// The configured hop limit.
        limit: usize,
    },

    /// Any other transport fault.
    #[error("Connection error: {0}")]
    Other(String),

    /// The request could not be built (invalid header name, body encoding).
    #[error("{0}")]
    Build(String),
}

impl TransportError {
    /// Returns the failure kind this error maps to.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ContentEncoding(_) => FailureKind::ContentEncoding,
            Self::CertificateVerification(_) => FailureKind::CertificateVerification,
            Self::DnsResolution(_) => FailureKind::DnsResolution,
            Self::ConnectionRefused(_) => FailureKind::ConnectionRefused,
            Self::Timeout => FailureKind::Timeout,
            Self::TlsHandshake(_) => FailureKind::TlsHandshake,
            Self::PeerCertificate(_) => FailureKind::PeerCertificate,
            Self::LocalCertificate(_) => FailureKind::LocalCertificate,
            Self::TooManyRedirects { .. } => FailureKind::TooManyRedirects,
            Self::Other(_) => FailureKind::Connection,
            Self::Build(_) => FailureKind::Internal,
        }
    }

    /// Returns true if the connection was never established.
    ///
    /// Only these failures are worth another attempt.
    #[must_use]
    pub const fn is_connection_establishment(&self) -> bool {
        matches!(self, Self::DnsResolution(_) | Self::ConnectionRefused(_))
    }

    /// Returns the underlying error text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::ContentEncoding(raw)
            | Self::CertificateVerification(raw)
            | Self::DnsResolution(raw)
            | Self::ConnectionRefused(raw)
            | Self::TlsHandshake(raw)
            | Self::PeerCertificate(raw)
            | Self::LocalCertificate(raw)
            | Self::Other(raw)
            | Self::Build(raw) => Some(raw),
            Self::Timeout | Self::TooManyRedirects { .. } => None,
        }
    }

    /// Converts into an execution failure.
    ///
    /// Build errors are internal and get classified by message.
    #[must_use]
    pub fn into_failure(self, elapsed_ms: u64) -> ExecutionFailure {
        match self {
            Self::Build(raw) => ExecutionFailure::internal(&raw, elapsed_ms),
            Self::Other(_) => ExecutionFailure::new(self.kind(), self.to_string(), elapsed_ms),
            other => {
                let failure = ExecutionFailure::new(other.kind(), other.to_string(), elapsed_ms);
                match other.raw() {
                    Some(raw) if !raw.is_empty() => failure.with_details(raw),
                    _ => failure,
                }
            }
        }
    }
}

/// Token for cancelling one in-flight execution.
///
/// Cloning shares the token; cancelling any clone cancels them all.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Cancels the execution observing this token.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns a receiver to hand to the executor.
    #[must_use]
    pub fn receiver(&self) -> CancellationReceiver {
        CancellationReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Receiving side of a [`CancellationToken`].
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    receiver: watch::Receiver<bool>,
}

impl CancellationReceiver {
    /// Completes when cancellation is requested.
    ///
    /// Never completes if every token was dropped without cancelling.
    pub async fn cancelled(&mut self) {
        let closed = self
            .receiver
            .wait_for(|cancelled| *cancelled)
            .await
            .is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
