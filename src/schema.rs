//! Header schema detection for benchmark time logs
//!
//! Benchmark logs carry a variable number of repeated-trial timing columns
//! (`time_ms0;time_ms1;...`) between fixed metadata columns. The timing
//! range is sniffed once from the header line and passed explicitly to
//! every downstream parse call, never re-derived per record.

use crate::error::{QlatError, Result};

/// Field separator used by time logs, query files, and cache files
pub const FIELD_SEPARATOR: char = ';';

/// Prefix shared by all repeated-trial timing columns
const TIME_COLUMN_PREFIX: &str = "time_ms";

/// Half-open index range of the trial timing columns in a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Index of the first `time_ms*` column
    pub start: usize,
    /// Index one past the last `time_ms*` column
    pub end: usize,
}

impl TimeRange {
    /// Number of repeated trials recorded per query
    pub fn trial_count(&self) -> usize {
        self.end - self.start
    }
}

/// File-level format tag, selected once per log file by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Header-detected variable number of `time_ms*` trial columns
    VariableTrial(TimeRange),
    /// Fixed legacy layout with a single timing column
    Legacy,
}

impl LogFormat {
    /// Select the format for a file: the legacy flag wins, otherwise the
    /// timing range is detected from the header line.
    pub fn for_header(header: &str, legacy: bool) -> Result<Self> {
        if legacy {
            Ok(Self::Legacy)
        } else {
            detect_time_range(header).map(Self::VariableTrial)
        }
    }
}

/// Scan a header line for the maximal contiguous run of fields whose name
/// begins with `time_ms`, returning its half-open column range.
pub fn detect_time_range(header: &str) -> Result<TimeRange> {
    let fields: Vec<&str> = header.trim_end().split(FIELD_SEPARATOR).collect();

    let start = fields
        .iter()
        .position(|f| f.starts_with(TIME_COLUMN_PREFIX))
        .ok_or(QlatError::Schema)?;

    // The run may extend to the last header field.
    let end = fields[start..]
        .iter()
        .position(|f| !f.starts_with(TIME_COLUMN_PREFIX))
        .map(|offset| start + offset)
        .unwrap_or(fields.len());

    Ok(TimeRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_single_trial_column() {
        let range = detect_time_range("query;num_terms;time_ms0;failed").unwrap();
        assert_eq!(range, TimeRange { start: 2, end: 3 });
        assert_eq!(range.trial_count(), 1);
    }

    #[test]
    fn test_detects_multiple_trial_columns() {
        let header = "query;threshold;num_terms;time_ms0;time_ms1;time_ms2;failed;low;act";
        let range = detect_time_range(header).unwrap();
        assert_eq!(range, TimeRange { start: 3, end: 6 });
        assert_eq!(range.trial_count(), 3);
    }

    #[test]
    fn test_run_extending_to_last_field() {
        let range = detect_time_range("num_terms;time_ms0;time_ms1").unwrap();
        assert_eq!(range, TimeRange { start: 1, end: 3 });
    }

    #[test]
    fn test_no_timing_columns_is_schema_error() {
        let err = detect_time_range("query;num_terms;elapsed;failed").unwrap_err();
        assert!(matches!(err, QlatError::Schema));
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let range = detect_time_range("num_terms;time_ms0;failed\n").unwrap();
        assert_eq!(range, TimeRange { start: 1, end: 2 });
    }

    #[test]
    fn test_format_selection_prefers_legacy_flag() {
        let format = LogFormat::for_header("anything;goes;here", true).unwrap();
        assert_eq!(format, LogFormat::Legacy);
    }

    #[test]
    fn test_format_selection_detects_variable() {
        let format = LogFormat::for_header("num_terms;time_ms0;failed", false).unwrap();
        assert_eq!(
            format,
            LogFormat::VariableTrial(TimeRange { start: 1, end: 2 })
        );
    }
}
