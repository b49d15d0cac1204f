//! Human-facing text report
//!
//! Printed to stdout; the layout is for eyes, not for machine parsing
//! (use `--format json` or `--format csv` for that).

use crate::compare::Comparison;
use crate::stats::AggregateResult;

/// Print one run's statistics and its per-qlen bucket table.
pub fn print_report(result: &AggregateResult) {
    println!("=== {} ({} queries) ===", result.name, result.scalar_times.len());
    println!("  Mean:         {:.3} ms", result.mean);
    println!("  Std Dev:      {:.3} ms", result.stddev);
    println!("  Median (P50): {:.3} ms", result.median);
    println!("  P95:          {:.3} ms", result.p95);
    println!("  P99:          {:.3} ms", result.p99);
    if let Some(ratio) = result.threshold_ratio {
        println!("  Threshold recall ratio: {:.4}", ratio);
    }
    println!();

    println!("  qlen     count     avg_ms");
    println!("  ------ ------- ----------");
    for bucket in 1..=result.qlen_cap as usize {
        let count = result.qlen_counts[bucket - 1];
        let label = if bucket == result.qlen_cap as usize {
            format!("{bucket}+")
        } else {
            bucket.to_string()
        };
        match result.qlen_means[bucket - 1] {
            Some(mean) => println!("  {:>6} {:>7} {:>10.3}", label, count, mean),
            None => println!("  {:>6} {:>7} {:>10}", label, count, "n/a"),
        }
    }
    println!();
}

/// Print the pairwise verdict.
pub fn print_comparison(comparison: &Comparison) {
    println!(
        "{} is {:.2}% faster than {} (relative gain {:.4})",
        comparison.superior,
        comparison.relative_gain * 100.0,
        comparison.inferior,
        comparison.relative_gain
    );
}
