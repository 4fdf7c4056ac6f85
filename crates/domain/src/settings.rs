//! Executor settings.
//!
//! Every field has a default, so a partial or empty settings file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::request::HttpMethod;
use crate::tls::TlsPolicy;

/// Tunables of the request executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorSettings {
    /// Total time budget per execution, connect and read included.
    pub timeout_ms: u64,
    /// Budget for establishing the connection.
    pub connect_timeout_ms: u64,
    /// Maximum redirect hops followed.
    pub max_redirects: usize,
    /// Extra attempts after a connection-establishment failure.
    pub max_retries: usize,
    /// Fixed wait between attempts.
    pub retry_backoff_ms: u64,
    /// Also retry methods that are not safe (POST, PUT, PATCH, DELETE).
    pub retry_unsafe_methods: bool,
    /// TLS policy.
    pub tls: TlsPolicy,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Number of history records kept.
    pub history_limit: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            max_redirects: 5,
            max_retries: 2,
            retry_backoff_ms: 1_000,
            retry_unsafe_methods: false,
            tls: TlsPolicy::default(),
            user_agent: concat!("Courier/", env!("CARGO_PKG_VERSION")).to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ExecutorSettings {
    /// Total timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connect timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Backoff between attempts as a `Duration`.
    #[must_use]
    pub const fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Number of retries allowed for a method.
    #[must_use]
    pub const fn retries_for(&self, method: HttpMethod) -> usize {
        if method.is_safe() || self.retry_unsafe_methods {
            self.max_retries
        } else {
            0
        }
    }

    /// Checks that the timeouts are usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSettings` for zero timeouts or a connect
    /// timeout larger than the total.
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_ms == 0 {
            return Err(DomainError::InvalidSettings(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(DomainError::InvalidSettings(
                "connect_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_ms > self.timeout_ms {
            return Err(DomainError::InvalidSettings(format!(
                "connect_timeout_ms ({}) exceeds timeout_ms ({})",
                self.connect_timeout_ms, self.timeout_ms
            )));
        }
        Ok(())
    }
}
