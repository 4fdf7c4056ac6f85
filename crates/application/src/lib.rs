//! Courier Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Request preparation and the retry policy
//! - Use case orchestration

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod prepare;
pub mod retry;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::ExecuteRequest;
pub use ports::{
    CancellationReceiver, CancellationToken, Clock, HistorySink, HistorySinkError, HttpClient,
    RequestStore, RequestStoreError, TransportError,
};
pub use prepare::{EncodedBody, PreparedRequest, prepare};
pub use retry::RetryPolicy;
pub use use_cases::{
    CreateRequest, CreateRequestInput, CreateRequestOutput, DuplicateRequest, ExecuteSavedRequest,
};
