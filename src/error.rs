//! Error kinds for the log-analysis and cache-building pipelines

use thiserror::Error;

/// Errors produced by schema detection, record parsing, run comparison,
/// and the ranked-results/query merge-join.
///
/// All of these are deterministic parse or logic errors: the caller
/// aborts the current file's analysis rather than emitting partial,
/// silently-biased statistics.
#[derive(Error, Debug)]
pub enum QlatError {
    /// No header field starts with the `time_ms` prefix
    #[error("no `time_ms` column found in header")]
    Schema,

    /// Non-numeric or missing field in a data row
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Ranked-results stream desynchronized from the query stream
    #[error("ranked-results stream desynchronized from query stream: {0}")]
    StreamAlignment(String),

    /// Pairwise comparator invoked with an invalid input set
    #[error("invalid pairwise comparison: {0}")]
    Comparison(String),
}

impl QlatError {
    /// Shorthand for a line-identified malformed-record error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QlatError>;
