//! Static score-threshold cache building and merging
//!
//! The builder walks the query stream and the TREC-style ranked-results
//! stream in lockstep: both are grouped by the same query-id sequence, so
//! for each query it consumes ranked lines until the id changes and keeps
//! the score at the target rank as that query's threshold. Ranked groups
//! whose id never matches a query are a protocol violation, not something
//! to resynchronize around. The cache key is the query *text*, so merging
//! a newer generation over a prior one is last-write-wins per query.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{QlatError, Result};
use crate::schema::FIELD_SEPARATOR;

/// Query text to rank-k score. BTreeMap keeps persisted output
/// deterministic.
pub type ThresholdCache = BTreeMap<String, f64>;

// TREC run file columns (tab-separated)
const RANKED_ID_COLUMN: usize = 0;
const RANKED_RANK_COLUMN: usize = 3;
const RANKED_SCORE_COLUMN: usize = 4;

struct RankedLine<'a> {
    id: &'a str,
    rank: u32,
    score: f64,
}

fn parse_ranked_line(line: &str, line_no: usize) -> Result<RankedLine<'_>> {
    let fields: Vec<&str> = line.trim_end().split('\t').collect();
    if fields.len() <= RANKED_SCORE_COLUMN {
        return Err(QlatError::malformed(
            line_no,
            "ranked-results line has too few tab-separated fields",
        ));
    }

    let rank = fields[RANKED_RANK_COLUMN].parse::<u32>().map_err(|_| {
        QlatError::malformed(
            line_no,
            format!("expected a rank, got `{}`", fields[RANKED_RANK_COLUMN]),
        )
    })?;
    let score = fields[RANKED_SCORE_COLUMN].parse::<f64>().map_err(|_| {
        QlatError::malformed(
            line_no,
            format!("expected a score, got `{}`", fields[RANKED_SCORE_COLUMN]),
        )
    })?;

    Ok(RankedLine {
        id: fields[RANKED_ID_COLUMN],
        rank,
        score,
    })
}

fn parse_query_line(line: &str, line_no: usize) -> Result<(&str, &str)> {
    line.trim_end()
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| QlatError::malformed(line_no, "query line is missing the `;` separator"))
}

/// Builds a query-text to threshold mapping from ranked retrieval output
#[derive(Debug)]
pub struct ThresholdCacheBuilder {
    top_k: u32,
    cache: ThresholdCache,
}

impl ThresholdCacheBuilder {
    /// Cache the score observed at rank `top_k`
    pub fn new(top_k: u32) -> Self {
        Self {
            top_k,
            cache: ThresholdCache::new(),
        }
    }

    /// Seed the builder with a prior cache generation; newly computed
    /// entries overwrite prior values for the same query text.
    pub fn with_prior(mut self, prior: ThresholdCache) -> Self {
        self.cache = prior;
        self
    }

    /// Merge-join the ranked-results stream against the query stream and
    /// return the finished mapping. Queries whose rank-k score is missing
    /// or non-positive produce no entry.
    pub fn build(mut self, ranked: &str, queries: &str) -> Result<ThresholdCache> {
        let mut ranked_lines = ranked
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .peekable();

        let mut processed = 0u64;
        for (query_index, query_line) in queries.lines().enumerate() {
            if query_line.trim().is_empty() {
                continue;
            }
            let (query_id, query_text) = parse_query_line(query_line, query_index + 1)?;

            let mut threshold = 0f64;
            while let Some(&(ranked_index, ranked_line)) = ranked_lines.peek() {
                let parsed = parse_ranked_line(ranked_line, ranked_index + 1)?;
                if parsed.id != query_id {
                    break;
                }
                ranked_lines.next();
                if parsed.rank == self.top_k {
                    threshold = parsed.score;
                }
            }

            if threshold > 0.0 {
                self.cache.insert(query_text.to_string(), threshold);
            }

            processed += 1;
            if processed % 10_000 == 0 {
                debug!(processed, "cache build progress");
            }
        }

        // Anything still unconsumed belongs to an id the query stream
        // never produced.
        if let Some(&(ranked_index, ranked_line)) = ranked_lines.peek() {
            let parsed = parse_ranked_line(ranked_line, ranked_index + 1)?;
            return Err(QlatError::StreamAlignment(format!(
                "ranked-results group for id `{}` (line {}) has no matching query",
                parsed.id,
                ranked_index + 1
            )));
        }

        Ok(self.cache)
    }
}

/// Parse a persisted cache file: one `query_text;threshold` entry per
/// line, split on the first `;`.
pub fn parse_cache(contents: &str) -> Result<ThresholdCache> {
    let mut cache = ThresholdCache::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (query, threshold) = line
            .trim_end()
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| QlatError::malformed(index + 1, "cache line is missing the `;` separator"))?;
        let threshold = threshold.parse::<f64>().map_err(|_| {
            QlatError::malformed(index + 1, format!("expected a threshold, got `{threshold}`"))
        })?;
        cache.insert(query.to_string(), threshold);
    }
    Ok(cache)
}

/// Serialize a cache for persistence, thresholds at fixed precision.
pub fn format_cache(cache: &ThresholdCache) -> String {
    let mut out = String::new();
    for (query, threshold) in cache {
        out.push_str(&format!("{query};{threshold:.6}\n"));
    }
    out
}
