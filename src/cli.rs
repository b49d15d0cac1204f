//! CLI argument parsing for qlat

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::aggregate::Metric;

/// Output format for run statistics
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON for machine parsing
    Json,
    /// Per-qlen-bucket CSV for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "qlat")]
#[command(version)]
#[command(about = "Query-latency benchmark log analysis and static cache tooling", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-run latency statistics from one or more benchmark time logs
    Stats {
        /// Benchmark time logs (semicolon-delimited, header line first)
        #[arg(required = true)]
        logs: Vec<PathBuf>,

        /// Run names, one per log (defaults to the file stem)
        #[arg(short, long, value_delimiter = ',')]
        names: Vec<String>,

        /// Reduction applied to repeated-trial timings
        #[arg(short, long, value_enum, default_value = "mean")]
        metric: Metric,

        /// Largest query-length bucket; longer queries clamp into it
        #[arg(short = 'q', long = "qlen-cap", value_name = "N", default_value = "20")]
        qlen_cap: u32,

        /// Parse the fixed-column legacy log layout
        #[arg(long)]
        legacy: bool,

        /// Output format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Pairwise comparison of exactly two runs
    Compare {
        /// First benchmark time log
        log_a: PathBuf,

        /// Second benchmark time log
        log_b: PathBuf,

        /// Run names, one per log (defaults to the file stem)
        #[arg(short, long, value_delimiter = ',')]
        names: Vec<String>,

        /// Reduction applied to repeated-trial timings
        #[arg(short, long, value_enum, default_value = "mean")]
        metric: Metric,

        /// Largest query-length bucket; longer queries clamp into it
        #[arg(short = 'q', long = "qlen-cap", value_name = "N", default_value = "20")]
        qlen_cap: u32,

        /// Parse the fixed-column legacy log layout
        #[arg(long)]
        legacy: bool,

        /// Weight bucket means by pooled per-bucket query counts
        #[arg(short, long)]
        weighted: bool,
    },

    /// Build a static score-threshold cache from ranked retrieval output
    Cache {
        /// Ranked results (TREC run format, tab-separated)
        ranked: PathBuf,

        /// Query file (`id;text` per line, same id order as the ranked file)
        queries: PathBuf,

        /// Rank whose score becomes the cached threshold
        #[arg(short = 'k', long = "top-k", value_name = "K")]
        top_k: u32,

        /// Output cache file
        #[arg(short, long)]
        out: PathBuf,

        /// Prior cache to merge under; newly computed entries override
        #[arg(long, value_name = "FILE")]
        merge: Option<PathBuf>,
    },
}
