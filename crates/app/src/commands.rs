//! Command handlers.
//!
//! Each handler prints to stdout and reports whether the command succeeded;
//! diagnostics go through `tracing` to stderr.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use courier_application::{
    CancellationReceiver, CancellationToken, CreateRequest, CreateRequestInput, DuplicateRequest,
    ExecuteRequest, ExecuteSavedRequest,
};
use courier_domain::request::RequestDescriptor;
use courier_domain::{ExecutionOutcome, ExecutionResult, ExecutorSettings, HistoryRecord};
use courier_infrastructure::{
    FileHistoryRepository, FileRequestStore, ReqwestHttpClient, SettingsRepository, SystemClock,
    from_json_bytes,
};
use tracing::{debug, error, info, warn};

use crate::cli::{Commands, HistoryAction};

type CommandResult = Result<bool, Box<dyn Error>>;

/// Everything a command needs, wired once per invocation.
pub struct Services {
    store: Arc<FileRequestStore>,
    history: Arc<FileHistoryRepository>,
    executor: Arc<ExecuteRequest<ReqwestHttpClient>>,
}

impl Services {
    /// Loads settings from `data_dir` and builds the adapters.
    ///
    /// # Errors
    /// Returns an error if the settings are invalid or the HTTP client
    /// cannot be configured.
    pub async fn open(data_dir: &Path, insecure: bool) -> Result<Self, Box<dyn Error>> {
        let mut settings: ExecutorSettings = SettingsRepository::new(data_dir).load().await?;
        if insecure {
            settings.tls.verify_certificates = false;
        }
        debug!(data_dir = %data_dir.display(), "using data directory");

        let client = ReqwestHttpClient::from_settings(&settings)?;
        let store = Arc::new(FileRequestStore::new(data_dir));
        let history = Arc::new(FileHistoryRepository::new(data_dir, settings.history_limit));
        let executor = Arc::new(ExecuteRequest::new(
            Arc::new(client),
            history.clone(),
            Arc::new(SystemClock::new()),
            settings,
        ));

        Ok(Self {
            store,
            history,
            executor,
        })
    }

    /// Runs one command. `Ok(false)` means the request itself failed.
    ///
    /// # Errors
    /// Returns an error for unusable input, unknown ids or storage failures.
    pub async fn dispatch(&self, command: Commands) -> CommandResult {
        match command {
            Commands::Run { file } => self.run(&file).await,
            Commands::RunSaved { id } => self.run_saved(&id).await,
            Commands::Save {
                file,
                name,
                description,
            } => self.save(&file, name, description).await,
            Commands::Duplicate { id } => self.duplicate(&id).await,
            Commands::List => self.list().await,
            Commands::History { limit, action } => match action {
                None => self.show_history(limit).await,
                Some(HistoryAction::Show { id }) => self.show_history_entry(&id).await,
                Some(HistoryAction::Delete { id }) => self.delete_history_entry(&id).await,
                Some(HistoryAction::Clear) => self.clear_history().await,
            },
            Commands::Replay { id } => self.replay(&id).await,
        }
    }

    async fn run(&self, file: &Path) -> CommandResult {
        let descriptor = read_descriptor(file).await?;
        let outcome = self
            .executor
            .execute_with_cancellation(&descriptor, cancel_on_interrupt())
            .await;
        print_outcome(&outcome)
    }

    async fn run_saved(&self, id: &str) -> CommandResult {
        let use_case = ExecuteSavedRequest::new(self.store.clone(), self.executor.clone());
        let outcome = use_case
            .execute_with_cancellation(id, cancel_on_interrupt())
            .await?;
        print_outcome(&outcome)
    }

    async fn save(&self, file: &Path, name: String, description: Option<String>) -> CommandResult {
        let descriptor = read_descriptor(file).await?;
        let use_case = CreateRequest::new(self.store.clone(), Arc::new(SystemClock::new()));
        let output = use_case
            .execute(CreateRequestInput {
                name,
                description,
                descriptor,
            })
            .await?;
        println!("{}", output.request.id);
        Ok(true)
    }

    async fn duplicate(&self, id: &str) -> CommandResult {
        let use_case = DuplicateRequest::new(self.store.clone(), Arc::new(SystemClock::new()));
        let new_id = use_case.execute(id).await?;
        println!("{new_id}");
        Ok(true)
    }

    async fn list(&self) -> CommandResult {
        for request in self.store.list().await? {
            println!(
                "{}  {:<7} {}  {}",
                request.id, request.method, request.url, request.name
            );
        }
        Ok(true)
    }

    async fn show_history(&self, limit: usize) -> CommandResult {
        let now = Utc::now();
        for record in self.history.recent(limit).await? {
            println!("{}", history_line(&record, now));
        }
        Ok(true)
    }

    async fn show_history_entry(&self, id: &str) -> CommandResult {
        let record = self.history_entry(id).await?;
        println!("{}", serde_json::to_string_pretty(&record)?);
        Ok(true)
    }

    async fn delete_history_entry(&self, id: &str) -> CommandResult {
        if !self.history.remove(id).await? {
            return Err(not_found(id));
        }
        info!(history_id = %id, "history entry deleted");
        Ok(true)
    }

    async fn clear_history(&self) -> CommandResult {
        self.history.clear().await?;
        info!("history cleared");
        Ok(true)
    }

    async fn history_entry(&self, id: &str) -> Result<HistoryRecord, Box<dyn Error>> {
        self.history.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn replay(&self, id: &str) -> CommandResult {
        let record = self.history_entry(id).await?;
        let outcome = self
            .executor
            .execute_with_cancellation(&record.replay_descriptor(), cancel_on_interrupt())
            .await;
        print_outcome(&outcome)
    }
}

fn not_found(id: &str) -> Box<dyn Error> {
    format!("history entry not found: {id}").into()
}

async fn read_descriptor(path: &Path) -> Result<RequestDescriptor, Box<dyn Error>> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(from_json_bytes(&content)?)
}

/// Cancels the execution when the user presses Ctrl-C.
fn cancel_on_interrupt() -> CancellationReceiver {
    let token = CancellationToken::new();
    let receiver = token.receiver();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling request");
            token.cancel();
        }
    });
    receiver
}

fn print_outcome(outcome: &ExecutionOutcome) -> CommandResult {
    if let Err(failure) = outcome {
        error!(
            kind = failure.kind.title(),
            category = failure.kind.category().as_str(),
            "{}",
            failure.message
        );
    }
    let result = ExecutionResult::from_outcome(outcome);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.success)
}

fn history_line(record: &HistoryRecord, now: chrono::DateTime<Utc>) -> String {
    let status = record.status.map_or_else(
        || {
            record
                .result
                .error_message
                .clone()
                .unwrap_or_else(|| "failed".to_string())
        },
        |code| code.to_string(),
    );
    format!(
        "{}  {:>9}  {:<7} {}  {}  {}",
        record.id,
        record.time_ago(now),
        record.method,
        record.url,
        status,
        record.duration_display()
    )
}
