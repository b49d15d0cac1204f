//! Distributional statistics over aggregated run times
//!
//! One `AggregateResult` is computed per log file and never mutated
//! afterwards: whole-sequence mean/stddev/median/p95/p99, per-query-length
//! bucket means with the last bucket clamping longer queries, and the
//! threshold-recall diagnostic. Sums and moments go through Trueno's SIMD
//! vectors; percentiles use linear interpolation over the sorted sequence.

use tracing::debug;

use crate::aggregate::{aggregate, Metric};
use crate::record::RunRecord;

/// Per-run aggregate statistics, constructed once and immutable after
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Run name, unique within a comparison set
    pub name: String,
    /// One scalar per surviving record, in record order
    pub scalar_times: Vec<f32>,
    pub mean: f32,
    pub stddev: f32,
    pub median: f32,
    pub p95: f32,
    pub p99: f32,
    /// Largest bucket; `num_terms >= qlen_cap` clamps into it
    pub qlen_cap: u32,
    /// Mean scalar time per bucket, index `b - 1` holds bucket `b`.
    /// `None` marks a bucket with no contributing records; zero would
    /// silently bias downstream comparisons.
    pub qlen_means: Vec<Option<f32>>,
    /// Contributing record count per bucket, same indexing
    pub qlen_counts: Vec<u64>,
    /// Mean of `low_threshold / act_threshold` over records with a
    /// positive actual threshold; `None` when no record qualifies
    pub threshold_ratio: Option<f32>,
}

impl AggregateResult {
    /// Compute the full statistics for one run.
    ///
    /// `qlen_cap` is clamped to at least 1. Records with `num_terms == 0`
    /// contribute to the whole-sequence statistics but to no bucket.
    pub fn compute(name: &str, records: &[RunRecord], metric: Metric, qlen_cap: u32) -> Self {
        let cap = qlen_cap.max(1);
        let scalar_times: Vec<f32> = records.iter().map(|r| aggregate(r, metric)).collect();

        if scalar_times.is_empty() {
            return Self::empty(name, cap);
        }

        let v = trueno::Vector::from_slice(&scalar_times);
        let mean = v.mean().unwrap_or(0.0);
        let stddev = v.stddev().unwrap_or(0.0);

        let mut sorted = scalar_times.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = percentile(&sorted, 50.0);
        let p95 = percentile(&sorted, 95.0);
        let p99 = percentile(&sorted, 99.0);

        let buckets = cap as usize;
        let mut totals = vec![0f64; buckets];
        let mut qlen_counts = vec![0u64; buckets];
        for (record, &time) in records.iter().zip(&scalar_times) {
            if record.num_terms == 0 {
                continue;
            }
            let bucket = (record.num_terms as usize).min(buckets);
            totals[bucket - 1] += f64::from(time);
            qlen_counts[bucket - 1] += 1;
        }
        let qlen_means = totals
            .iter()
            .zip(&qlen_counts)
            .map(|(&total, &count)| {
                if count > 0 {
                    Some((total / count as f64) as f32)
                } else {
                    None
                }
            })
            .collect();

        let mut ratio_sum = 0f32;
        let mut ratio_count = 0u32;
        for record in records {
            if record.act_threshold > 0.0 {
                ratio_sum += record.low_threshold / record.act_threshold;
                ratio_count += 1;
            }
        }
        let threshold_ratio = (ratio_count > 0).then(|| ratio_sum / ratio_count as f32);

        debug!(name, records = scalar_times.len(), mean, "computed run statistics");

        Self {
            name: name.to_string(),
            scalar_times,
            mean,
            stddev,
            median,
            p95,
            p99,
            qlen_cap: cap,
            qlen_means,
            qlen_counts,
            threshold_ratio,
        }
    }

    fn empty(name: &str, cap: u32) -> Self {
        Self {
            name: name.to_string(),
            scalar_times: Vec::new(),
            mean: 0.0,
            stddev: 0.0,
            median: 0.0,
            p95: 0.0,
            p99: 0.0,
            qlen_cap: cap,
            qlen_means: vec![None; cap as usize],
            qlen_counts: vec![0; cap as usize],
            threshold_ratio: None,
        }
    }
}

/// Linear-interpolation percentile over a pre-sorted sequence.
///
/// `index = p/100 * (len - 1)`, interpolating between the floor and ceil
/// neighbors. Kept identical across runs so cross-run comparisons stay
/// meaningful.
pub fn percentile(sorted: &[f32], percentile: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = (percentile / 100.0) * (sorted.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f32;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
