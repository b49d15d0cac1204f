//! JSON output format for run statistics
//!
//! `--format json` serialization of one or more aggregate results.

use serde::{Deserialize, Serialize};

use crate::stats::AggregateResult;

/// One query-length bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonQlenBucket {
    /// Bucket index; the largest one clamps all longer queries
    pub qlen: u32,
    /// Contributing record count
    pub count: u64,
    /// Mean scalar time; `null` for a bucket with no data
    pub avg_ms: Option<f32>,
}

/// Full per-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunReport {
    pub name: String,
    pub queries: usize,
    pub mean_ms: f32,
    pub stddev_ms: f32,
    pub median_ms: f32,
    pub p95_ms: f32,
    pub p99_ms: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_ratio: Option<f32>,
    pub qlen_buckets: Vec<JsonQlenBucket>,
}

impl JsonRunReport {
    pub fn from_result(result: &AggregateResult) -> Self {
        let qlen_buckets = result
            .qlen_means
            .iter()
            .zip(&result.qlen_counts)
            .enumerate()
            .map(|(index, (&avg_ms, &count))| JsonQlenBucket {
                qlen: index as u32 + 1,
                count,
                avg_ms,
            })
            .collect();

        Self {
            name: result.name.clone(),
            queries: result.scalar_times.len(),
            mean_ms: result.mean,
            stddev_ms: result.stddev,
            median_ms: result.median,
            p95_ms: result.p95,
            p99_ms: result.p99,
            threshold_ratio: result.threshold_ratio,
            qlen_buckets,
        }
    }
}

/// Serialize reports for all runs as a pretty-printed JSON array.
pub fn to_json(results: &[AggregateResult]) -> serde_json::Result<String> {
    let reports: Vec<JsonRunReport> = results.iter().map(JsonRunReport::from_result).collect();
    serde_json::to_string_pretty(&reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Metric;
    use crate::record::RunRecord;

    fn result() -> AggregateResult {
        let records = vec![
            RunRecord {
                num_terms: 1,
                timings: vec![5.0],
                failed: false,
                low_threshold: 0.0,
                act_threshold: 0.0,
            },
            RunRecord {
                num_terms: 4,
                timings: vec![15.0],
                failed: false,
                low_threshold: 0.0,
                act_threshold: 0.0,
            },
        ];
        AggregateResult::compute("run-a", &records, Metric::Mean, 3)
    }

    #[test]
    fn test_report_shape() {
        let report = JsonRunReport::from_result(&result());
        assert_eq!(report.name, "run-a");
        assert_eq!(report.queries, 2);
        assert_eq!(report.qlen_buckets.len(), 3);
        assert_eq!(report.qlen_buckets[0].avg_ms, Some(5.0));
        // Clamp bucket holds the qlen-4 record
        assert_eq!(report.qlen_buckets[2].avg_ms, Some(15.0));
    }

    #[test]
    fn test_empty_bucket_serializes_as_null() {
        let json = to_json(&[result()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["qlen_buckets"][1]["avg_ms"].is_null());
    }

    #[test]
    fn test_absent_ratio_is_omitted() {
        let json = to_json(&[result()]).unwrap();
        assert!(!json.contains("threshold_ratio"));
    }

    #[test]
    fn test_round_trip() {
        let json = to_json(&[result()]).unwrap();
        let reports: Vec<JsonRunReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].mean_ms, 10.0);
    }
}
