//! Qlat - query-latency benchmark log analysis and static-cache tooling
//!
//! This library parses semicolon-delimited benchmark time logs from
//! repeated-trial query workloads, computes per-run and cross-run latency
//! statistics bucketed by query length, and builds/merges a persistent
//! per-query score-threshold cache from ranked retrieval output.

pub mod aggregate;
pub mod cache;
pub mod cli;
pub mod compare;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod record;
pub mod report;
pub mod schema;
pub mod stats;
