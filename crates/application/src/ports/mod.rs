//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod history_sink;
mod http_client;
mod request_store;

pub use clock::Clock;
pub use history_sink::{HistorySink, HistorySinkError};
pub use http_client::{CancellationReceiver, CancellationToken, HttpClient, TransportError};
pub use request_store::{RequestStore, RequestStoreError};
