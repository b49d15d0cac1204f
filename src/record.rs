//! Run record parsing for both log layouts
//!
//! A `RunRecord` is one benchmark trial result: the query length, one or
//! more trial latencies, a failure flag, and the optional early-termination
//! threshold pair. Failed records are dropped at parse time; malformed
//! fields abort the whole file (fail-fast, line-identified).

use tracing::debug;

use crate::error::{QlatError, Result};
use crate::schema::{LogFormat, TimeRange, FIELD_SEPARATOR};

// Fixed columns of the legacy single-trial layout
const LEGACY_VALID_FLAG_INDEX: usize = 1;
const LEGACY_NUM_TERMS_INDEX: usize = 6;
const LEGACY_TIME_MS_INDEX: usize = 7;

/// One benchmark trial result
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Query length (term count); drives qlen bucketing
    pub num_terms: u32,
    /// Trial latencies in milliseconds, never empty for a kept record
    pub timings: Vec<f32>,
    /// Failure flag as reported by the system under test
    pub failed: bool,
    /// Early-termination score bound used by the system under test
    pub low_threshold: f32,
    /// Ground-truth score bound for the same query (0 when absent)
    pub act_threshold: f32,
}

fn parse_f32(field: &str, line: usize) -> Result<f32> {
    field
        .parse::<f32>()
        .map_err(|_| QlatError::malformed(line, format!("expected a float, got `{field}`")))
}

fn parse_u32(field: &str, line: usize) -> Result<u32> {
    field
        .parse::<u32>()
        .map_err(|_| QlatError::malformed(line, format!("expected an integer, got `{field}`")))
}

fn parse_flag(field: &str, line: usize) -> Result<bool> {
    match field {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        other => Err(QlatError::malformed(
            line,
            format!("expected a boolean flag, got `{other}`"),
        )),
    }
}

fn require_field(fields: &[&str], index: usize, name: &str, line: usize) -> Result<()> {
    if index < fields.len() {
        Ok(())
    } else {
        Err(QlatError::malformed(line, format!("missing `{name}` field")))
    }
}

/// Parse one data row against a detected timing range.
///
/// Metadata columns sit at fixed offsets from the range: `num_terms`
/// immediately before it, the failure flag immediately after it, then the
/// low/actual threshold pair (absent thresholds default to 0). Failed
/// records yield `None`.
pub fn parse_record(line: &str, range: TimeRange, line_no: usize) -> Result<Option<RunRecord>> {
    let fields: Vec<&str> = line.trim_end().split(FIELD_SEPARATOR).collect();

    if range.start == 0 {
        return Err(QlatError::malformed(
            line_no,
            "no query-length column precedes the timing range",
        ));
    }
    require_field(&fields, range.end - 1, "time_ms", line_no)?;

    let num_terms = parse_u32(fields[range.start - 1], line_no)?;
    let timings = fields[range.start..range.end]
        .iter()
        .map(|f| parse_f32(f, line_no))
        .collect::<Result<Vec<f32>>>()?;

    let failed = match fields.get(range.end) {
        Some(f) => parse_flag(f, line_no)?,
        None => false,
    };
    if failed {
        return Ok(None);
    }

    let low_threshold = match fields.get(range.end + 1) {
        Some(f) => parse_f32(f, line_no)?,
        None => 0.0,
    };
    let act_threshold = match fields.get(range.end + 2) {
        Some(f) => parse_f32(f, line_no)?,
        None => 0.0,
    };

    Ok(Some(RunRecord {
        num_terms,
        timings,
        failed,
        low_threshold,
        act_threshold,
    }))
}

/// Parse one data row of the legacy fixed-column layout.
///
/// The result-count column doubles as a validity flag: it must parse
/// numeric and be positive for the record to be kept.
pub fn parse_legacy_record(line: &str, line_no: usize) -> Result<Option<RunRecord>> {
    let fields: Vec<&str> = line.trim_end().split(FIELD_SEPARATOR).collect();
    require_field(&fields, LEGACY_TIME_MS_INDEX, "time_ms", line_no)?;

    let valid = parse_f32(fields[LEGACY_VALID_FLAG_INDEX], line_no)?;
    if valid <= 0.0 {
        return Ok(None);
    }

    let num_terms = parse_u32(fields[LEGACY_NUM_TERMS_INDEX], line_no)?;
    let time_ms = parse_f32(fields[LEGACY_TIME_MS_INDEX], line_no)?;

    Ok(Some(RunRecord {
        num_terms,
        timings: vec![time_ms],
        failed: false,
        low_threshold: 0.0,
        act_threshold: 0.0,
    }))
}

/// Parse a whole log file into surviving run records.
///
/// Line 1 is the header (schema is detected from it once in variable-trial
/// mode); blank lines are skipped; any malformed data line aborts the file.
pub fn parse_log(contents: &str, legacy: bool) -> Result<Vec<RunRecord>> {
    let mut lines = contents.lines().enumerate();
    let (_, header) = lines.next().ok_or(QlatError::Schema)?;
    let format = LogFormat::for_header(header, legacy)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let parsed = match format {
            LogFormat::VariableTrial(range) => parse_record(line, range, line_no)?,
            LogFormat::Legacy => parse_legacy_record(line, line_no)?,
        };
        match parsed {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    debug!(kept = records.len(), dropped, "parsed log");
    Ok(records)
}
