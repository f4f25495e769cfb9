//! Batch partitioning of fetched records
//!
//! Records arrive one at a time in identifier order; each is routed by its
//! `type` field into the support-chats or offline-messages batch. Batches
//! accumulate in memory, appending to a temporary file every
//! [`FLUSH_INTERVAL`] records and logging progress every
//! [`PROGRESS_INTERVAL`]. Finalization writes each complete batch to its
//! final CSV file.
//!
//! The in-memory batch is never drained: the final file is always written
//! from the full accumulation, regardless of what has been flushed to the
//! temp file along the way.

use tracing::info;

use super::csv;
use super::path::{batch_label, OutputNaming};
use super::OutputResult;
use crate::exporter::config::{FLUSH_INTERVAL, PROGRESS_INTERVAL};
use crate::exporter::job::FlushMode;
use crate::{ChatRecord, RecordType};

use std::path::PathBuf;

/// Routes records into per-type batches and writes CSV output
pub struct BatchPartitioner {
    support: Batch,
    offline: Batch,
    dropped: usize,
    flush_mode: FlushMode,
    flush_interval: usize,
    progress_interval: usize,
    total_ids: usize,
}

struct Batch {
    label: &'static str,
    records: Vec<ChatRecord>,
    /// Records already appended to the temp file (delta mode bookkeeping)
    flushed: usize,
    /// Periodic temp-file flushes performed so far
    flush_count: u32,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl Batch {
    fn new(naming: &OutputNaming, record_type: RecordType) -> Self {
        Self {
            label: batch_label(record_type),
            records: Vec::new(),
            flushed: 0,
            flush_count: 0,
            temp_path: naming.temp_path(record_type),
            final_path: naming.final_path(record_type),
        }
    }
}

/// Per-batch record counts reported after finalization
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionTotals {
    /// Records written to the support-chats file
    pub support_chats: usize,
    /// Records written to the offline-messages file
    pub offline_messages: usize,
    /// Records with an unknown or missing type, present in neither file
    pub dropped: usize,
}

impl BatchPartitioner {
    /// Create a partitioner writing to the paths described by `naming`.
    ///
    /// `total_ids` is the size of the identifier list being processed; it
    /// only feeds the progress log lines.
    pub fn new(naming: &OutputNaming, flush_mode: FlushMode, total_ids: usize) -> Self {
        Self {
            support: Batch::new(naming, RecordType::Chat),
            offline: Batch::new(naming, RecordType::OfflineMsg),
            dropped: 0,
            flush_mode,
            flush_interval: FLUSH_INTERVAL,
            progress_interval: PROGRESS_INTERVAL,
            total_ids,
        }
    }

    /// Override the flush and progress intervals (tests exercise flush
    /// behavior without generating hundreds of records)
    pub fn with_intervals(mut self, flush_interval: usize, progress_interval: usize) -> Self {
        self.flush_interval = flush_interval.max(1);
        self.progress_interval = progress_interval.max(1);
        self
    }

    /// Route one record into its batch.
    ///
    /// Records whose `type` is missing or unrecognized match no batch and
    /// are dropped - counted for the summary, never logged.
    pub fn route(&mut self, record: ChatRecord) -> OutputResult<()> {
        match record.record_type() {
            Some(RecordType::Chat) => self.push(Side::Support, record),
            Some(RecordType::OfflineMsg) => self.push(Side::Offline, record),
            None => {
                self.dropped += 1;
                Ok(())
            }
        }
    }

    fn push(&mut self, side: Side, record: ChatRecord) -> OutputResult<()> {
        let total = self.total_ids;
        let (flush_interval, progress_interval) = (self.flush_interval, self.progress_interval);
        let mode = self.flush_mode;
        let batch = self.batch_mut(side);

        batch.records.push(record);
        let len = batch.records.len();

        if len % progress_interval == 0 {
            info!("Completed {} of {} chats ({})", len, total, batch.label);
        }
        if len % flush_interval == 0 {
            Self::flush_to_temp(batch, mode)?;
        }
        Ok(())
    }

    fn flush_to_temp(batch: &mut Batch, mode: FlushMode) -> OutputResult<()> {
        let rows = match mode {
            FlushMode::Delta => &batch.records[batch.flushed..],
            FlushMode::FullBatch => &batch.records[..],
        };
        let written = csv::append_records(&batch.temp_path, rows)?;

        batch.flushed = batch.records.len();
        batch.flush_count += 1;
        info!(
            "Flushed {} {} records to {}",
            written,
            batch.label,
            batch.temp_path.display()
        );
        Ok(())
    }

    /// Write final output, flushing any pending delta to the temp file
    /// first.
    ///
    /// Each batch - including anything accumulated since the last periodic
    /// flush - is written in full to its final CSV file. In full-batch mode
    /// the temp file is left exactly as the last periodic flush produced it.
    pub fn finalize(mut self) -> OutputResult<PartitionTotals> {
        for side in [Side::Support, Side::Offline] {
            let mode = self.flush_mode;
            let batch = self.batch_mut(side);

            if mode == FlushMode::Delta && batch.flushed < batch.records.len() {
                Self::flush_to_temp(batch, mode)?;
            }

            let written = csv::write_records(&batch.final_path, &batch.records)?;
            info!(
                "Wrote {} {} records to {}",
                written,
                batch.label,
                batch.final_path.display()
            );
        }

        Ok(PartitionTotals {
            support_chats: self.support.records.len(),
            offline_messages: self.offline.records.len(),
            dropped: self.dropped,
        })
    }

    /// Records currently accumulated in the support-chats batch
    pub fn support_len(&self) -> usize {
        self.support.records.len()
    }

    /// Records currently accumulated in the offline-messages batch
    pub fn offline_len(&self) -> usize {
        self.offline.records.len()
    }

    /// Records dropped so far for an unknown or missing type
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Periodic temp-file flushes performed so far, per batch
    pub fn temp_flush_counts(&self) -> (u32, u32) {
        (self.support.flush_count, self.offline.flush_count)
    }

    fn batch_mut(&mut self, side: Side) -> &mut Batch {
        match side {
            Side::Support => &mut self.support,
            Side::Offline => &mut self.offline,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Support,
    Offline,
}
