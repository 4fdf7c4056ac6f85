//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Body application onto `reqwest` request builders
//! - Transport error classification

mod body_builder;
mod error_classifier;

pub use body_builder::apply_body;
pub use error_classifier::{ErrorSignals, classify, classify_body_error, classify_reqwest};
