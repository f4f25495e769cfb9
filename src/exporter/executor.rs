//! Export executor
//!
//! Runs the complete workflow for one job: search the date range for chat
//! IDs, fetch and flatten each chat exactly once, route records into the
//! partitioner, and write final output. Fully sequential - the next fetch
//! starts only after the previous record is routed.

use indicatif::ProgressBar;
use std::time::Duration;
use tracing::{info, warn};

use crate::exporter::job::{ExportJob, ExportSummary};
use crate::exporter::ExportError;
use crate::fetcher::{fetch_chat, search_chat_ids, ApiConfig, ZendeskClient};
use crate::output::{BatchPartitioner, OutputError, OutputNaming};

/// Export executor owning the API client (and through it the rate limiter)
pub struct ExportExecutor {
    client: ZendeskClient,
}

impl ExportExecutor {
    /// Create an executor with a fresh client
    ///
    /// # Arguments
    /// * `config` - Endpoint and credential configuration
    /// * `max_calls` - Rate-limit budget per window
    /// * `window` - Rate-limit window duration
    pub fn new(config: ApiConfig, max_calls: u32, window: Duration) -> Self {
        Self {
            client: ZendeskClient::new(config, max_calls, window),
        }
    }

    /// Create an executor around an existing client
    pub fn with_client(client: ZendeskClient) -> Self {
        Self { client }
    }

    /// Execute one export job.
    ///
    /// On a fetch failure mid-run, records accumulated so far are flushed
    /// to the output files before the error propagates; the caller turns
    /// that into a non-zero exit. There is no retry - a human re-runs the
    /// job.
    ///
    /// # Arguments
    /// * `job` - Date range, output directory, and flush mode
    /// * `progress` - Optional progress bar, advanced once per fetched chat
    pub async fn execute(
        &self,
        job: &ExportJob,
        progress: Option<&ProgressBar>,
    ) -> Result<ExportSummary, ExportError> {
        std::fs::create_dir_all(&job.output_dir).map_err(|e| {
            OutputError::IoError(format!(
                "Failed to create output directory {}: {e}",
                job.output_dir.display()
            ))
        })?;

        let ids = search_chat_ids(&self.client, &job.range).await?;
        if let Some(pb) = progress {
            pb.set_length(ids.len() as u64);
        }

        let naming = OutputNaming::new(&job.output_dir, &job.range);
        let mut partitioner = BatchPartitioner::new(&naming, job.flush_mode, ids.len());

        for id in &ids {
            let record = match fetch_chat(&self.client, id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Fetch of chat {} failed; flushing accumulated records before aborting", id);
                    if let Err(flush_err) = partitioner.finalize() {
                        warn!("Flush during abort also failed: {}", flush_err);
                    }
                    return Err(e.into());
                }
            };
            partitioner.route(record)?;
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        let totals = partitioner.finalize()?;
        let summary = ExportSummary {
            chat_ids: ids.len(),
            support_chats: totals.support_chats,
            offline_messages: totals.offline_messages,
            dropped: totals.dropped,
            api_calls: self.client.rate_limiter().total_calls().await,
        };

        info!(
            "Export complete: {} ids, {} support chats, {} offline messages, {} dropped, {} API calls",
            summary.chat_ids,
            summary.support_chats,
            summary.offline_messages,
            summary.dropped,
            summary.api_calls
        );

        Ok(summary)
    }
}
