//! Pairwise run comparison
//!
//! The comparison is strictly pairwise: any other input cardinality is a
//! caller bug, not something to iterate over. The weighted variant pools
//! per-bucket query counts so two runs with different query-length mixes
//! are compared on equalized workload weight.

use crate::error::{QlatError, Result};
use crate::stats::AggregateResult;

/// Outcome of a pairwise comparison; the superior run has the lower mean
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub superior: String,
    pub inferior: String,
    /// `|mean_a - mean_b| / max(mean_a, mean_b)`
    pub relative_gain: f32,
}

fn exactly_two<'a>(
    results: &'a [AggregateResult],
) -> Result<(&'a AggregateResult, &'a AggregateResult)> {
    match results {
        [a, b] => Ok((a, b)),
        other => Err(QlatError::Comparison(format!(
            "expected exactly 2 runs, got {}",
            other.len()
        ))),
    }
}

fn from_means(name_a: &str, mean_a: f32, name_b: &str, mean_b: f32) -> Comparison {
    let max = mean_a.max(mean_b);
    let relative_gain = if max > 0.0 {
        (mean_a - mean_b).abs() / max
    } else {
        0.0
    };

    if mean_a <= mean_b {
        Comparison {
            superior: name_a.to_string(),
            inferior: name_b.to_string(),
            relative_gain,
        }
    } else {
        Comparison {
            superior: name_b.to_string(),
            inferior: name_a.to_string(),
            relative_gain,
        }
    }
}

/// Compare exactly two runs on their flat means.
pub fn compare(results: &[AggregateResult]) -> Result<Comparison> {
    let (a, b) = exactly_two(results)?;
    Ok(from_means(&a.name, a.mean, &b.name, b.mean))
}

/// Compare exactly two runs on bucket means weighted by pooled per-bucket
/// query counts.
///
/// Only buckets where both runs have data participate; the weight of
/// bucket `b` is `count_a[b] + count_b[b]`. Errors when the runs share no
/// populated bucket.
pub fn compare_weighted(results: &[AggregateResult]) -> Result<Comparison> {
    let (a, b) = exactly_two(results)?;

    let buckets = a.qlen_means.len().min(b.qlen_means.len());
    let mut weight_total = 0f64;
    let mut weighted_a = 0f64;
    let mut weighted_b = 0f64;

    for bucket in 0..buckets {
        if let (Some(mean_a), Some(mean_b)) = (a.qlen_means[bucket], b.qlen_means[bucket]) {
            let weight = (a.qlen_counts[bucket] + b.qlen_counts[bucket]) as f64;
            weight_total += weight;
            weighted_a += weight * f64::from(mean_a);
            weighted_b += weight * f64::from(mean_b);
        }
    }

    if weight_total == 0.0 {
        return Err(QlatError::Comparison(
            "runs share no populated query-length bucket".to_string(),
        ));
    }

    Ok(from_means(
        &a.name,
        (weighted_a / weight_total) as f32,
        &b.name,
        (weighted_b / weight_total) as f32,
    ))
}
