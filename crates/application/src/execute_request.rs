//! Execute Request Use Case
//!
//! The primary use case: validate a descriptor, send it with the bounded
//! retry and timeout policy, classify whatever goes wrong, and hand exactly
//! one history record to the sink before returning.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use courier_domain::request::RequestDescriptor;
use courier_domain::response::elapsed_millis;
use courier_domain::{
    DomainError, ExecutionFailure, ExecutionOutcome, ExecutorSettings, FailureKind, HistoryRecord,
};
use tokio::time::Instant;
use tokio_retry::RetryIf;
use tracing::{debug, info, warn};

use crate::ports::{CancellationReceiver, Clock, HistorySink, HttpClient, TransportError};
use crate::prepare::prepare;
use crate::retry::RetryPolicy;

/// Use case for executing HTTP requests.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::from_settings(&settings)?;
/// let use_case = ExecuteRequest::new(Arc::new(client), history, clock, settings);
///
/// let descriptor = RequestDescriptor::get("https://api.example.com/users");
/// let outcome = use_case.execute(&descriptor).await;
/// ```
pub struct ExecuteRequest<C: HttpClient> {
    client: Arc<C>,
    history: Arc<dyn HistorySink>,
    clock: Arc<dyn Clock>,
    settings: ExecutorSettings,
}

impl<C: HttpClient> ExecuteRequest<C> {
    /// Creates a new `ExecuteRequest` use case.
    pub fn new(
        client: Arc<C>,
        history: Arc<dyn HistorySink>,
        clock: Arc<dyn Clock>,
        settings: ExecutorSettings,
    ) -> Self {
        Self {
            client,
            history,
            clock,
            settings,
        }
    }

    /// Returns the settings in use.
    pub const fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Executes the descriptor and records the outcome.
    ///
    /// A received response is `Ok` whatever its status; only validation,
    /// transport and internal failures are `Err`.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> ExecutionOutcome {
        self.run(descriptor, None).await
    }

    /// Executes the descriptor, aborting when `cancel` fires.
    ///
    /// A cancelled execution ends with a `Cancelled` failure and is still
    /// recorded.
    pub async fn execute_with_cancellation(
        &self,
        descriptor: &RequestDescriptor,
        cancel: CancellationReceiver,
    ) -> ExecutionOutcome {
        self.run(descriptor, Some(cancel)).await
    }

    async fn run(
        &self,
        descriptor: &RequestDescriptor,
        cancel: Option<CancellationReceiver>,
    ) -> ExecutionOutcome {
        let started = Instant::now();
        let outcome = self.dispatch(descriptor, cancel, started).await;

        match &outcome {
            Ok(response) => info!(
                method = %descriptor.method,
                url = %descriptor.url,
                status = response.status,
                elapsed_ms = response.elapsed_ms,
                "request completed"
            ),
            Err(failure) => info!(
                method = %descriptor.method,
                url = %descriptor.url,
                kind = ?failure.kind,
                elapsed_ms = failure.elapsed_ms,
                "request failed: {}",
                failure.message
            ),
        }

        self.record(descriptor, &outcome).await;
        outcome
    }

    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
        cancel: Option<CancellationReceiver>,
        started: Instant,
    ) -> ExecutionOutcome {
        let prepared = match prepare(descriptor) {
            Ok(prepared) => prepared,
            Err(error) => {
                return Err(Self::validation_failure(
                    &error,
                    elapsed_millis(started.elapsed()),
                ));
            }
        };

        let policy = RetryPolicy::for_method(&self.settings, prepared.method);
        let max_attempts = policy.max_attempts();
        let attempt = AtomicUsize::new(0);
        let client = &*self.client;
        let prepared = &prepared;

        let send = RetryIf::spawn(
            policy.strategy(),
            || {
                let n = attempt.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(
                    attempt = n,
                    max_attempts,
                    method = %prepared.method,
                    url = %prepared.url,
                    "sending request"
                );
                client.send(prepared)
            },
            |error: &TransportError| {
                let retry = RetryPolicy::should_retry(error);
                if retry {
                    warn!(
                        url = %prepared.url,
                        error = error.raw().unwrap_or_default(),
                        "connection could not be established"
                    );
                }
                retry
            },
        );
        let bounded = tokio::time::timeout(self.settings.timeout(), send);

        let cancelled = async {
            match cancel {
                Some(mut receiver) => receiver.cancelled().await,
                None => std::future::pending().await,
            }
        };

        let result = tokio::select! {
            result = bounded => Some(result),
            () = cancelled => None,
        };

        let elapsed = started.elapsed();
        let elapsed_ms = elapsed_millis(elapsed);
        match result {
            Some(Ok(Ok(response))) => Ok(response.with_elapsed(elapsed)),
            Some(Ok(Err(error))) => Err(error.into_failure(elapsed_ms)),
            Some(Err(_)) => Err(TransportError::Timeout.into_failure(elapsed_ms)),
            None => Err(ExecutionFailure::new(
                FailureKind::Cancelled,
                "Request was cancelled.",
                elapsed_ms,
            )),
        }
    }

    fn validation_failure(error: &DomainError, elapsed_ms: u64) -> ExecutionFailure {
        let kind = match error {
            DomainError::UnsupportedMethod(_) => FailureKind::UnsupportedMethod,
            _ => FailureKind::InvalidUrl,
        };
        ExecutionFailure::new(kind, error.to_string(), elapsed_ms)
    }

    async fn record(&self, descriptor: &RequestDescriptor, outcome: &ExecutionOutcome) {
        let record = HistoryRecord::new(descriptor, outcome, self.clock.now());
        let id = record.id.clone();
        match self.history.record(record).await {
            Ok(()) => debug!(history_id = %id, "history recorded"),
            Err(error) => warn!(error = %error, "failed to record history entry"),
        }
    }
}
