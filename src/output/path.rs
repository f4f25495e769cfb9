//! Output file naming
//!
//! File names carry the searched date range and the run date so repeated
//! extractions of overlapping ranges never clobber each other:
//!
//! ```text
//! supportChats_ZendeskChats_2020-03-01-TO-2020-03-30-ON-070820.csv
//! offlineMessages_ZendeskChats_2020-03-01-TO-2020-03-30-ON-070820.csv
//! tmp_supportChats_ZendeskChats_2020-03-01-TO-2020-03-30-ON-070820.csv
//! tmp_offlineMessages_ZendeskChats_2020-03-01-TO-2020-03-30-ON-070820.csv
//! ```

use crate::range::DateRange;
use crate::RecordType;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Builds final and temporary CSV paths for one export run
#[derive(Debug, Clone)]
pub struct OutputNaming {
    output_dir: PathBuf,
    base_name: String,
}

impl OutputNaming {
    /// Naming for a run happening today
    pub fn new(output_dir: &Path, range: &DateRange) -> Self {
        Self::with_run_date(output_dir, range, Utc::now().date_naive())
    }

    /// Naming with an explicit run date (tests need a fixed stamp)
    pub fn with_run_date(output_dir: &Path, range: &DateRange, run_date: NaiveDate) -> Self {
        let base_name = format!(
            "ZendeskChats_{}-TO-{}-ON-{}.csv",
            range.start(),
            range.end(),
            run_date.format("%d%m%y")
        );
        Self {
            output_dir: output_dir.to_path_buf(),
            base_name,
        }
    }

    /// Final output file for one record type
    pub fn final_path(&self, record_type: RecordType) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}", batch_label(record_type), self.base_name))
    }

    /// Temporary flush file for one record type
    pub fn temp_path(&self, record_type: RecordType) -> PathBuf {
        self.output_dir
            .join(format!("tmp_{}_{}", batch_label(record_type), self.base_name))
    }
}

/// Human-readable batch label used in file names and progress logs
pub fn batch_label(record_type: RecordType) -> &'static str {
    match record_type {
        RecordType::Chat => "supportChats",
        RecordType::OfflineMsg => "offlineMessages",
    }
}
