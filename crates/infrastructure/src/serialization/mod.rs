//! Deterministic JSON serialization for Courier data files.
//!
//! Stored requests, history and settings are written with:
//! - Keys in declaration order, maps sorted (`BTreeMap` in domain types)
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
