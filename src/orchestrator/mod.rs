//! Query orchestration: validate, normalize, run the requested strategies in order
//! and aggregate their output.
//!
//! Records and the index are borrowed read-only, so any number of queries may run
//! concurrently against the same snapshot.

pub mod summary;

use std::time::Instant;

use crate::db::RecordIndex;
use crate::error::SearchError;
use crate::matching::{aggregate, build_strategy};
use crate::models::{AggregateResult, Record, SearchQuery, StrategyResult};
use crate::normalize::normalize_script;

pub use summary::SearchSummary;

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: AggregateResult,
    pub summary: SearchSummary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub parallel_fuzzy: bool,
}

pub fn run_search(
    query: &SearchQuery,
    records: &[Record],
    index: &dyn RecordIndex,
    opts: SearchOptions,
) -> Result<SearchOutcome, SearchError> {
    if !query.max_score.is_finite() || query.max_score < 0.0 {
        return Err(SearchError::InvalidMaxScore(query.max_score));
    }
    let started = Instant::now();
    let text = normalize_script(&query.text, query.lang);
    if text != query.text {
        log::debug!("Normalized query {:?} -> {:?}", query.text, text);
    }

    let mut results: Vec<StrategyResult> = Vec::with_capacity(query.strategies.len());
    for kind in &query.strategies {
        let strategy = build_strategy(
            *kind,
            index,
            records,
            query.max_score,
            opts.parallel_fuzzy,
        );
        let res = strategy.search(&text, query.lang)?;
        log::debug!("{} search returned {} matches", kind, res.matches.len());
        results.push(res);
    }

    let result = aggregate(results);
    let summary = SearchSummary::new(&query.text, query.lang, &result, started.elapsed());
    summary.log();
    Ok(SearchOutcome { result, summary })
}
