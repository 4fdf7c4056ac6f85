//! Courier Domain - Core business types
//!
//! This crate defines the domain model of the Courier request-execution
//! engine. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod failure;
pub mod history;
pub mod id;
pub mod request;
pub mod response;
pub mod result;
pub mod saved;
pub mod settings;
pub mod tls;

pub use error::{DomainError, DomainResult};
pub use failure::{ExecutionFailure, FailureCategory, FailureKind};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryRecord, RequestHistory};
pub use id::generate_id;
pub use result::{ExecutionOutcome, ExecutionResult};
pub use saved::{RequestId, SavedRequest};
pub use settings::ExecutorSettings;
pub use tls::{TlsPolicy, TlsSecurityWarning, TlsVersion};
