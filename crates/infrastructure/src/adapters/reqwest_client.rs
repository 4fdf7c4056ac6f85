//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One call is one attempt; retries and the total budget are handled by the
//! executor.

use std::future::Future;
use std::time::Instant;

use courier_application::PreparedRequest;
use courier_application::ports::{HttpClient, TransportError};
use courier_domain::request::HttpMethod;
use courier_domain::response::{ResponseHeaders, ResponseSpec, elapsed_millis};
use courier_domain::{ExecutorSettings, TlsPolicy, TlsVersion};
use reqwest::{Certificate, Client, Method};
use tracing::{debug, warn};

use crate::http::{apply_body, classify_body_error, classify_reqwest};

/// HTTP client implementation using reqwest.
///
/// Wraps a shared `reqwest::Client`, which holds the connection pool but
/// no per-request state.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    max_redirects: usize,
}

impl ReqwestHttpClient {
    /// Creates a client configured from executor settings.
    ///
    /// Configuration:
    /// - Total timeout and connect timeout
    /// - Redirects followed up to `max_redirects`
    /// - TLS verification per the TLS policy (on by default)
    /// - User-Agent from settings
    ///
    /// # Errors
    ///
    /// Returns `TransportError::LocalCertificate` if a configured CA file
    /// cannot be used, or `TransportError::Build` if the client cannot be
    /// created.
    pub fn from_settings(settings: &ExecutorSettings) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects));

        builder = Self::apply_tls(builder, &settings.tls)?;

        let client = builder
            .build()
            .map_err(|e| TransportError::Build(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_redirects: settings.max_redirects,
        })
    }

    fn apply_tls(
        mut builder: reqwest::ClientBuilder,
        tls: &TlsPolicy,
    ) -> Result<reqwest::ClientBuilder, TransportError> {
        for warning in tls.security_warnings() {
            warn!("{}", warning.message());
        }

        if !tls.verify_certificates {
            builder = builder.danger_accept_invalid_certs(true);
        }

        for path in &tls.ca_certificates {
            let pem = std::fs::read(path).map_err(|e| {
                TransportError::LocalCertificate(format!(
                    "cannot read CA certificate {}: {e}",
                    path.display()
                ))
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                TransportError::LocalCertificate(format!(
                    "invalid CA certificate {}: {e}",
                    path.display()
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
            debug!(path = %path.display(), "trusting extra CA certificate");
        }

        if let Some(version) = tls.min_tls_version {
            builder = builder.min_tls_version(Self::to_reqwest_tls_version(version));
        }

        Ok(builder)
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    const fn to_reqwest_tls_version(version: TlsVersion) -> reqwest::tls::Version {
        match version {
            TlsVersion::Tls1_0 => reqwest::tls::Version::TLS_1_0,
            TlsVersion::Tls1_1 => reqwest::tls::Version::TLS_1_1,
            TlsVersion::Tls1_2 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::Tls1_3 => reqwest::tls::Version::TLS_1_3,
        }
    }

    /// Collects response headers, keeping every value of repeated names.
    fn collect_headers(headers: &reqwest::header::HeaderMap) -> ResponseHeaders {
        let mut collected = ResponseHeaders::new();
        for (name, value) in headers {
            collected
                .entry(name.as_str().to_string())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }
        collected
    }

    async fn send_once(&self, request: &PreparedRequest) -> Result<ResponseSpec, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = apply_body(builder, &request.body)?;

        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| classify_reqwest(&e, self.max_redirects))?;

        let status = response.status().as_u16();
        let headers = Self::collect_headers(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_body_error(&e, self.max_redirects))?;

        let duration = start.elapsed();
        debug!(
            status,
            size_bytes = body.len(),
            elapsed_ms = elapsed_millis(duration),
            "response received"
        );

        Ok(ResponseSpec::new(status, headers, &body, duration))
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<ResponseSpec, TransportError>> + Send {
        self.send_once(request)
    }
}
