//! Trial-time reduction
//!
//! Benchmarks rerun each query several times; every record therefore
//! carries one timing per trial. The aggregator reduces those to one
//! scalar per record. `min` is the right choice when the repeated trials
//! exist to eliminate warm-up noise and the best-case cost is wanted;
//! `mean`/`median` otherwise.

use clap::ValueEnum;

use crate::record::RunRecord;

/// Reduction applied to a record's repeated-trial timings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Mean,
    Median,
    Min,
}

/// Reduce a record's trial timings to one scalar. Pure, stateless.
pub fn aggregate(record: &RunRecord, metric: Metric) -> f32 {
    match metric {
        Metric::Mean => trueno::Vector::from_slice(&record.timings)
            .mean()
            .unwrap_or(0.0),
        Metric::Min => trueno::Vector::from_slice(&record.timings)
            .min()
            .unwrap_or(0.0),
        Metric::Median => median(&record.timings),
    }
}

fn median(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timings: Vec<f32>) -> RunRecord {
        RunRecord {
            num_terms: 2,
            timings,
            failed: false,
            low_threshold: 0.0,
            act_threshold: 0.0,
        }
    }

    #[test]
    fn test_mean_aggregation() {
        let r = record(vec![5.0, 10.0, 15.0]);
        assert_eq!(aggregate(&r, Metric::Mean), 10.0);
    }

    #[test]
    fn test_median_aggregation() {
        let r = record(vec![15.0, 5.0, 10.0]);
        assert_eq!(aggregate(&r, Metric::Median), 10.0);
    }

    #[test]
    fn test_min_aggregation() {
        let r = record(vec![5.0, 10.0, 15.0]);
        assert_eq!(aggregate(&r, Metric::Min), 5.0);
    }

    #[test]
    fn test_median_even_length() {
        let r = record(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(aggregate(&r, Metric::Median), 2.5);
    }

    #[test]
    fn test_single_trial_all_metrics_agree() {
        let r = record(vec![7.5]);
        assert_eq!(aggregate(&r, Metric::Mean), 7.5);
        assert_eq!(aggregate(&r, Metric::Median), 7.5);
        assert_eq!(aggregate(&r, Metric::Min), 7.5);
    }
}
