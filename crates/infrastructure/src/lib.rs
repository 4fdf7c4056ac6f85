//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod http;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use http::{ErrorSignals, apply_body, classify, classify_body_error, classify_reqwest};
pub use persistence::{
    FileHistoryRepository, FileRequestStore, HistoryError, SettingsError, SettingsRepository,
    default_data_dir,
};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
