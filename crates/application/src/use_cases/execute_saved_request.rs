//! Execute saved request use case.

use std::sync::Arc;

use courier_domain::ExecutionOutcome;
use tracing::debug;

use crate::ApplicationResult;
use crate::execute_request::ExecuteRequest;
use crate::ports::{CancellationReceiver, HttpClient, RequestStore};

/// Use case for executing a request stored by id.
///
/// Resolution happens before execution: an unknown id is an error and
/// nothing is recorded.
pub struct ExecuteSavedRequest<C: HttpClient, S: RequestStore + ?Sized> {
    store: Arc<S>,
    executor: Arc<ExecuteRequest<C>>,
}

impl<C: HttpClient, S: RequestStore + ?Sized> ExecuteSavedRequest<C, S> {
    /// Creates a new `ExecuteSavedRequest` use case.
    #[must_use]
    pub const fn new(store: Arc<S>, executor: Arc<ExecuteRequest<C>>) -> Self {
        Self { store, executor }
    }

    /// Resolves the request and executes it.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the id is unknown. Execution
    /// failures are part of the returned outcome.
    pub async fn execute(&self, id: &str) -> ApplicationResult<ExecutionOutcome> {
        let request = self.store.resolve(id).await?;
        debug!(request_id = %id, name = %request.name, "executing saved request");
        Ok(self.executor.execute(&request.to_descriptor()).await)
    }

    /// Resolves the request and executes it with cancellation support.
    ///
    /// # Errors
    /// Returns `ApplicationError::NotFound` if the id is unknown.
    pub async fn execute_with_cancellation(
        &self,
        id: &str,
        cancel: CancellationReceiver,
    ) -> ApplicationResult<ExecutionOutcome> {
        let request = self.store.resolve(id).await?;
        debug!(request_id = %id, name = %request.name, "executing saved request");
        Ok(self
            .executor
            .execute_with_cancellation(&request.to_descriptor(), cancel)
            .await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::{Clock, HistorySink, HistorySinkError, TransportError};
    use crate::prepare::{EncodedBody, PreparedRequest};
    use crate::use_cases::test_support::InMemoryRequestStore;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use courier_domain::request::{HttpMethod, QueryParam, RequestBody, RequestDescriptor};
    use courier_domain::response::{ResponseHeaders, ResponseSpec};
    use courier_domain::{ExecutorSettings, HistoryRecord, SavedRequest};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Echoes nothing; remembers what it was asked to send.
    #[derive(Default)]
    struct CapturingClient {
        sent: Mutex<Vec<PreparedRequest>>,
    }

    impl HttpClient for CapturingClient {
        fn send(
            &self,
            request: &PreparedRequest,
        ) -> impl Future<Output = Result<ResponseSpec, TransportError>> + Send {
            self.sent.lock().unwrap().push(request.clone());
            async {
                Ok(ResponseSpec::new(
                    201,
                    ResponseHeaders::new(),
                    b"created",
                    Duration::from_millis(3),
                ))
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<HistoryRecord>>,
    }

    #[async_trait]
    impl HistorySink for RecordingSink {
        async fn record(&self, record: HistoryRecord) -> Result<(), HistorySinkError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }
    }

    struct EpochClock;

    impl Clock for EpochClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::UNIX_EPOCH
        }
    }

    struct Fixture {
        store: Arc<InMemoryRequestStore>,
        client: Arc<CapturingClient>,
        sink: Arc<RecordingSink>,
        use_case: ExecuteSavedRequest<CapturingClient, InMemoryRequestStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRequestStore::default());
        let client = Arc::new(CapturingClient::default());
        let sink = Arc::new(RecordingSink::default());
        let executor = ExecuteRequest::new(
            Arc::clone(&client),
            Arc::clone(&sink) as Arc<dyn HistorySink>,
            Arc::new(EpochClock),
            ExecutorSettings::default(),
        );
        let use_case = ExecuteSavedRequest::new(Arc::clone(&store), Arc::new(executor));
        Fixture {
            store,
            client,
            sink,
            use_case,
        }
    }

    #[tokio::test]
    async fn test_execute_saved_request() {
        let fx = fixture();
        let descriptor = RequestDescriptor::new(HttpMethod::Post, "https://api.example.com/items")
            .with_query_param(QueryParam::new("notify", "true"))
            .with_body(RequestBody::json(r#"{"name":"widget"}"#));
        let saved = SavedRequest::from_descriptor("Create item", descriptor.clone(), Utc::now());
        let id = fx.store.create(saved).await.unwrap();

        let outcome = fx.use_case.execute(&id).await.unwrap();
        assert_eq!(outcome.unwrap().status, 201);

        let sent = fx.client.sent.lock().unwrap()[0].clone();
        assert_eq!(
            sent.url.as_str(),
            "https://api.example.com/items?notify=true"
        );
        assert_eq!(sent.body, EncodedBody::Json(json!({"name": "widget"})));

        // Save, execute, then replay from history round-trips the descriptor.
        let records = fx.sink.records.lock().unwrap().clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].replay_descriptor(), descriptor);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_executed_or_recorded() {
        let fx = fixture();

        let result = fx.use_case.execute("does-not-exist").await;

        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
        assert!(fx.client.sent.lock().unwrap().is_empty());
        assert!(fx.sink.records.lock().unwrap().is_empty());
    }
}
