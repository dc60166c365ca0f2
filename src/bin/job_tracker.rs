use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use job_tracker_lib::application::services::SyncOutcome;
use job_tracker_lib::presentation::dto::application_dto::{
    ApplicationInput, ApplicationRecordDto, NotificationDto,
};
use job_tracker_lib::presentation::dto::{ApiResponse, outcome_label};
use job_tracker_lib::{AppConfig, AppState, RecordId, SortOrder, StatusFilter, init_logging};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "job_tracker")]
#[command(about = "Track job applications against a remote record store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config.json containing API_BASE_URL
    #[arg(short, long, env = "JOB_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter (overrides JOB_TRACKER_LOG_FILTER)
    #[arg(long)]
    log_filter: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List applications with the persisted filter and sort order
    List {
        /// Status filter to apply and persist ("all" or 0-4)
        #[arg(long)]
        status: Option<String>,
        /// Sort order to apply and persist (dateAsc, dateDesc, companyAsc, companyDesc)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Add a new application
    Add(RecordArgs),
    /// Update an existing application
    Update {
        id: i64,
        #[command(flatten)]
        fields: RecordArgs,
    },
    /// Delete an application
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct RecordArgs {
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    role: String,
    /// Status code (0 Applied, 1 Interview, 2 Offer, 3 Rejected, 4 Accepted)
    #[arg(long)]
    status: Option<u8>,
    /// Applied date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<RecordArgs> for ApplicationInput {
    fn from(args: RecordArgs) -> Self {
        Self {
            company: args.company,
            role: args.role,
            status: args.status,
            applied_date: args.date,
            notes: args.notes,
        }
    }
}

#[derive(Serialize)]
struct CommandReport {
    outcome: &'static str,
    records: Vec<ApplicationRecordDto>,
    notification: Option<NotificationDto>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(path) = &cli.config {
        config
            .apply_client_config_file(path)
            .with_context(|| format!("Failed to apply {}", path.display()))?;
    }
    let filter = cli
        .log_filter
        .clone()
        .unwrap_or_else(|| config.logging.filter.clone());
    init_logging(&filter, cli.json_logs || config.logging.json);

    info!("Starting job tracker v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config).await?;
    let tracker = &state.tracker;

    if let Commands::List { status, sort } = &cli.command {
        if let Some(raw) = status {
            let filter = StatusFilter::parse(raw)
                .with_context(|| format!("Unknown status filter: {raw}"))?;
            tracker.set_filter_status(filter).await;
        }
        if let Some(raw) = sort {
            let order = SortOrder::from(raw.as_str());
            anyhow::ensure!(order.is_recognized(), "Unknown sort order: {raw}");
            tracker.set_sort_order(order).await;
        }
    }

    let loaded = tracker.load().await;
    let outcome = match (loaded, cli.command) {
        (SyncOutcome::Applied, Commands::Add(fields)) => {
            let form = ApplicationInput::from(fields)
                .apply_to(tracker.add_form().await)
                .map_err(anyhow::Error::msg)?;
            tracker.add(form).await
        }
        (SyncOutcome::Applied, Commands::Update { id, fields }) => {
            let id = RecordId::new(id);
            if !tracker.start_edit(id).await {
                print_json(&ApiResponse::<()>::failure(format!(
                    "Application {id} was not found"
                )))?;
                return Ok(());
            }
            let input = ApplicationInput::from(fields);
            let mut invalid = None;
            tracker
                .edit_draft(|draft| match input.apply_to(draft.clone()) {
                    Ok(updated) => *draft = updated,
                    Err(err) => invalid = Some(err),
                })
                .await;
            if let Some(err) = invalid {
                tracker.cancel_edit().await;
                anyhow::bail!(err);
            }
            tracker.save_edit().await
        }
        (SyncOutcome::Applied, Commands::Delete { id, yes }) => {
            let id = RecordId::new(id);
            tracker.request_delete(id).await;
            if yes {
                tracker.confirm_delete().await
            } else {
                debug!(%id, "deletion not confirmed, pass --yes to delete");
                tracker.cancel_delete().await;
                SyncOutcome::Ignored
            }
        }
        (loaded, _) => loaded,
    };

    let report = CommandReport {
        outcome: outcome_label(outcome),
        records: tracker
            .view()
            .await
            .iter()
            .map(ApplicationRecordDto::from)
            .collect(),
        notification: state
            .notifications
            .current()
            .await
            .as_ref()
            .map(NotificationDto::from),
    };
    print_json(&ApiResponse::success(report))?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
