//! Per-qlen-bucket CSV output
//!
//! One row per query-length bucket, one mean column per run, with the
//! query counts of the first run as the workload-shape column. Feeds
//! spreadsheet analysis or external plotting.

use crate::stats::AggregateResult;

#[derive(Debug)]
struct CsvRunColumn {
    name: String,
    means: Vec<Option<f32>>,
}

/// CSV formatter for one or more runs over a shared qlen cap
#[derive(Debug, Default)]
pub struct CsvQlenOutput {
    counts: Vec<u64>,
    runs: Vec<CsvRunColumn>,
}

impl CsvQlenOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one run as a mean column. The first run added also supplies
    /// the `query_count` column.
    pub fn add_run(&mut self, result: &AggregateResult) {
        if self.runs.is_empty() {
            self.counts = result.qlen_counts.clone();
        }
        self.runs.push(CsvRunColumn {
            name: result.name.clone(),
            means: result.qlen_means.clone(),
        });
    }

    /// Render the table. Buckets with no data are left as empty cells,
    /// never written as zero.
    pub fn to_csv(&self) -> String {
        let mut output = String::from("query_length,query_count");
        for run in &self.runs {
            output.push(',');
            output.push_str(&run.name);
        }
        output.push('\n');

        for bucket in 0..self.counts.len() {
            output.push_str(&format!("{},{}", bucket + 1, self.counts[bucket]));
            for run in &self.runs {
                output.push(',');
                if let Some(mean) = run.means.get(bucket).copied().flatten() {
                    output.push_str(&format!("{mean:.3}"));
                }
            }
            output.push('\n');
        }

        output
    }
}
