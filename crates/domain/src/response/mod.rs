//! HTTP Response domain types

mod spec;

pub use spec::{ResponseHeaders, ResponseSpec, StatusCode, elapsed_millis};
