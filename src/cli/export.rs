//! Export command implementation

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use crate::exporter::config::{DEFAULT_MAX_CALLS_PER_WINDOW, DEFAULT_WINDOW_SECS};
use crate::exporter::{ExportExecutor, ExportJob, ExportSummary, FlushMode};
use crate::fetcher::config::{DEFAULT_BASE_URL, DEFAULT_CHAT_PATH, DEFAULT_SEARCH_PATH};
use crate::fetcher::ApiConfig;
use crate::range::DateRange;

use super::CliError;

/// Zendesk Chat exporter CLI
#[derive(Parser, Debug)]
#[command(name = "zendesk-chat-exporter")]
#[command(about = "Export chat transcripts and offline messages to CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// API username (agent email)
    #[arg(long, global = true, env = "ZENDESK_USERNAME", default_value = "")]
    pub username: String,

    /// API password
    #[arg(long, global = true, env = "ZENDESK_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Base URL of the chat API
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Detail endpoint path, relative to the base URL
    #[arg(long, global = true, default_value = DEFAULT_CHAT_PATH)]
    pub chat_path: String,

    /// Search endpoint path, relative to the base URL
    #[arg(long, global = true, default_value = DEFAULT_SEARCH_PATH)]
    pub search_path: String,

    /// Maximum API calls per rate-limit window
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_CALLS_PER_WINDOW,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_calls: u32,

    /// Rate-limit window duration in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub window_secs: u64,

    /// Output format (json or human)
    #[arg(long, global = true, default_value = "human")]
    pub output_format: OutputFormat,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export chats in a date range to CSV files
    Export(ExportArgs),
}

/// Export command arguments
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Directory receiving final and temporary CSV files
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Temp-file flush behavior: delta (no duplicate rows) or full-batch
    /// (legacy behavior, re-appends the whole batch on every flush)
    #[arg(long, default_value = "delta")]
    pub flush_mode: FlushMode,
}

/// Output format options
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

impl ExportArgs {
    /// Execute the export
    pub async fn execute(&self, cli: &Cli) -> Result<(), CliError> {
        if cli.username.is_empty() || cli.password.is_empty() {
            return Err(CliError::InvalidArgument(
                "username and password are required (flags or ZENDESK_USERNAME/ZENDESK_PASSWORD)"
                    .to_string(),
            ));
        }

        let range = DateRange::parse(&self.start_date, &self.end_date)?;
        let config = ApiConfig::new(&cli.username, &cli.password)
            .with_base_url(&cli.base_url)
            .with_chat_path(&cli.chat_path)
            .with_search_path(&cli.search_path);

        let executor = ExportExecutor::new(
            config,
            cli.max_calls,
            Duration::from_secs(cli.window_secs),
        );
        let job = ExportJob::new(range, self.output_dir.clone(), self.flush_mode);

        info!(
            "Starting export: {} into {} (flush mode: {})",
            range,
            self.output_dir.display(),
            self.flush_mode
        );

        let progress = create_progress_bar();
        let result = executor.execute(&job, Some(&progress)).await;
        progress.finish_and_clear();

        match cli.output_format {
            OutputFormat::Json => output_json(&job, &result),
            OutputFormat::Human => output_human(&job, &result),
        }

        result.map(|_| ()).map_err(CliError::ExportError)
    }
}

/// Output result as JSON
fn output_json(job: &ExportJob, result: &Result<ExportSummary, crate::exporter::ExportError>) {
    let output = match result {
        Ok(summary) => serde_json::json!({
            "success": true,
            "start_date": job.range.start().to_string(),
            "end_date": job.range.end().to_string(),
            "output_dir": job.output_dir.display().to_string(),
            "flush_mode": job.flush_mode.to_string(),
            "chat_ids": summary.chat_ids,
            "support_chats": summary.support_chats,
            "offline_messages": summary.offline_messages,
            "dropped": summary.dropped,
            "api_calls": summary.api_calls,
            "error": serde_json::Value::Null,
        }),
        Err(e) => serde_json::json!({
            "success": false,
            "start_date": job.range.start().to_string(),
            "end_date": job.range.end().to_string(),
            "output_dir": job.output_dir.display().to_string(),
            "flush_mode": job.flush_mode.to_string(),
            "error": e.to_string(),
        }),
    };

    // json! over plain data cannot produce unserializable values
    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}

/// Output result in human-readable format
fn output_human(job: &ExportJob, result: &Result<ExportSummary, crate::exporter::ExportError>) {
    match result {
        Ok(summary) => {
            println!("\nExport completed successfully!");
            println!("Range: {}", job.range);
            println!("Output: {}", job.output_dir.display());
            println!("Chat ids found: {}", summary.chat_ids);
            println!("Support chats: {}", summary.support_chats);
            println!("Offline messages: {}", summary.offline_messages);
            if summary.dropped > 0 {
                println!("Dropped (unknown type): {}", summary.dropped);
            }
            println!("API calls: {}", summary.api_calls);
        }
        Err(e) => {
            eprintln!("\nExport failed!");
            eprintln!("Error: {e}");
            error!("Export failed: {}", e);
        }
    }
}

/// Create a progress bar; its length is set once the search has counted
/// the chats to fetch
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("hardcoded template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message("Exporting chats");
    pb
}
