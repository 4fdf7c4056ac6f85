//! File-backed persistence.
//!
//! Everything lives under one data directory:
//! ```text
//! <data-dir>/
//!   settings.json
//!   history.json
//!   requests/
//!     <id>.json
//! ```

mod files;
mod history_repository;
mod request_store;
mod settings_repository;

use std::path::PathBuf;

pub use history_repository::{FileHistoryRepository, HistoryError};
pub use request_store::FileRequestStore;
pub use settings_repository::{SettingsError, SettingsRepository};

/// Returns the platform data directory for Courier.
///
/// - Linux: `~/.local/share/courier`
/// - macOS: `~/Library/Application Support/courier`
/// - Windows: `%APPDATA%/courier`
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("courier"))
}
