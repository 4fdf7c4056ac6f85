//! Retry policy for connection-establishment failures.

use std::time::Duration;

use courier_domain::ExecutorSettings;
use courier_domain::request::HttpMethod;
use tokio_retry::strategy::FixedInterval;

use crate::ports::TransportError;

/// How often and how fast a failed attempt is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: usize,
    /// Fixed wait between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Builds the policy for a method under the given settings.
    ///
    /// Unsafe methods get no retries unless the settings allow it.
    #[must_use]
    pub const fn for_method(settings: &ExecutorSettings, method: HttpMethod) -> Self {
        Self {
            max_retries: settings.retries_for(method),
            backoff: settings.retry_backoff(),
        }
    }

    /// Creates a fixed-interval retry strategy.
    ///
    /// Returns a strategy iterator ready for use with `tokio_retry::RetryIf`,
    /// limited to `max_retries` delays.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> + use<> {
        FixedInterval::new(self.backoff).take(self.max_retries)
    }

    /// Returns true if the error is worth another attempt.
    ///
    /// Timeouts and anything after a received response are never retried.
    #[must_use]
    pub const fn should_retry(error: &TransportError) -> bool {
        error.is_connection_establishment()
    }

    /// Total attempts allowed, the first one included.
    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_policy_for_get() {
        let policy = RetryPolicy::for_method(&ExecutorSettings::default(), HttpMethod::Get);
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(
            policy.strategy().collect::<Vec<_>>(),
            vec![Duration::from_secs(1), Duration::from_secs(1)]
        );
    }

    #[test]
    fn test_post_is_not_retried_by_default() {
        let policy = RetryPolicy::for_method(&ExecutorSettings::default(), HttpMethod::Post);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.strategy().count(), 0);
    }

    #[test]
    fn test_should_retry() {
        let refused = TransportError::ConnectionRefused("connection refused".into());
        assert!(RetryPolicy::should_retry(&refused));
        assert!(!RetryPolicy::should_retry(&TransportError::Timeout));

        let untrusted = TransportError::CertificateVerification(String::new());
        assert!(!RetryPolicy::should_retry(&untrusted));
    }
}
