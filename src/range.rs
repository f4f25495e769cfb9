//! Date range parsing and validation
//!
//! The search API is queried with an inclusive timestamp range; serializing
//! the export into date-bounded chunks keeps individual searches small.

use chrono::NaiveDate;
use std::fmt;

/// Inclusive calendar date range for a chat search
///
/// # Examples
///
/// ```
/// use zendesk_chat_exporter::range::DateRange;
///
/// let range = DateRange::parse("2020-03-01", "2020-03-30").unwrap();
/// assert_eq!(range.search_query(), "timestamp:[2020-03-01 TO 2020-03-30]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from already-parsed dates
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` date strings
    ///
    /// # Errors
    ///
    /// Returns an error if either string is not a valid `YYYY-MM-DD` date or
    /// if the end date is before the start date.
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    /// Get the start date
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Get the end date
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Render the search API query for this range
    pub fn search_query(&self) -> String {
        format!("timestamp:[{} TO {}]", self.start, self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| RangeError::InvalidDate(format!("invalid date '{s}': {e}")))
}

/// Date range errors
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    /// A date string did not parse as YYYY-MM-DD
    #[error("{0}")]
    InvalidDate(String),

    /// The end date precedes the start date
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Parsed start date
        start: NaiveDate,
        /// Parsed end date
        end: NaiveDate,
    },
}
