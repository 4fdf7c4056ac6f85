//! Command-line interface definition.

use std::path::PathBuf;

/// Run, save and replay HTTP requests.
#[derive(clap::Parser, Debug)]
#[command(name = "courier", version)]
pub struct Cli {
    /// Directory holding saved requests, history and settings
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip TLS certificate verification for this run
    #[arg(long, global = true)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Execute a request described in a JSON file
    Run {
        /// Path to the request descriptor
        file: PathBuf,
    },
    /// Execute a saved request
    RunSaved {
        /// Saved request id
        id: String,
    },
    /// Save a request described in a JSON file
    Save {
        /// Path to the request descriptor
        file: PathBuf,
        /// Display name
        #[arg(long)]
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Copy a saved request under a new id
    Duplicate {
        /// Saved request id
        id: String,
    },
    /// List saved requests
    List,
    /// Show recent executions, or inspect and prune the history
    History {
        /// Maximum number of entries
        #[arg(long, default_value_t = 20)]
        limit: usize,

        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Execute a history entry again
    Replay {
        /// History entry id
        id: String,
    },
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    /// Print one history entry as JSON
    Show {
        /// History entry id
        id: String,
    },
    /// Delete one history entry
    Delete {
        /// History entry id
        id: String,
    },
    /// Delete every history entry
    Clear,
}
