use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use qlat::aggregate::Metric;
use qlat::cli::{Cli, Command, OutputFormat};
use qlat::csv_output::CsvQlenOutput;
use qlat::stats::AggregateResult;
use qlat::{cache, compare, json_output, record, report};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_name(path: &Path, names: &[String], index: usize) -> String {
    names.get(index).cloned().unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    })
}

/// Load each log, parse it, and compute its aggregate statistics.
fn load_results(
    logs: &[PathBuf],
    names: &[String],
    metric: Metric,
    qlen_cap: u32,
    legacy: bool,
) -> Result<Vec<AggregateResult>> {
    logs.iter()
        .enumerate()
        .map(|(index, path)| {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read log file {}", path.display()))?;
            let records = record::parse_log(&contents, legacy)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(AggregateResult::compute(
                &run_name(path, names, index),
                &records,
                metric,
                qlen_cap,
            ))
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match args.command {
        Command::Stats {
            logs,
            names,
            metric,
            qlen_cap,
            legacy,
            format,
        } => {
            let results = load_results(&logs, &names, metric, qlen_cap, legacy)?;
            match format {
                OutputFormat::Text => {
                    for result in &results {
                        report::print_report(result);
                    }
                }
                OutputFormat::Json => println!("{}", json_output::to_json(&results)?),
                OutputFormat::Csv => {
                    let mut output = CsvQlenOutput::new();
                    for result in &results {
                        output.add_run(result);
                    }
                    print!("{}", output.to_csv());
                }
            }
        }

        Command::Compare {
            log_a,
            log_b,
            names,
            metric,
            qlen_cap,
            legacy,
            weighted,
        } => {
            let results = load_results(&[log_a, log_b], &names, metric, qlen_cap, legacy)?;
            for result in &results {
                report::print_report(result);
            }
            let comparison = if weighted {
                compare::compare_weighted(&results)?
            } else {
                compare::compare(&results)?
            };
            report::print_comparison(&comparison);
        }

        Command::Cache {
            ranked,
            queries,
            top_k,
            out,
            merge,
        } => {
            let ranked_contents = fs::read_to_string(&ranked)
                .with_context(|| format!("Failed to read ranked-results file {}", ranked.display()))?;
            let query_contents = fs::read_to_string(&queries)
                .with_context(|| format!("Failed to read query file {}", queries.display()))?;

            let mut builder = cache::ThresholdCacheBuilder::new(top_k);
            if let Some(prior_path) = merge {
                let prior_contents = fs::read_to_string(&prior_path)
                    .with_context(|| format!("Failed to read prior cache {}", prior_path.display()))?;
                builder = builder.with_prior(cache::parse_cache(&prior_contents)?);
            }

            let cache_map = builder.build(&ranked_contents, &query_contents)?;
            fs::write(&out, cache::format_cache(&cache_map))
                .with_context(|| format!("Failed to write cache file {}", out.display()))?;
            println!("Wrote {} cache entries to {}", cache_map.len(), out.display());
        }
    }

    Ok(())
}
