use std::collections::HashSet;

use crate::models::{AggregateResult, MatchScore, ScoredMatch, StrategyResult};

/// Merge strategy outputs in the order given, keeping the first copy of each
/// `(id, name, type)`. Binary-strategy matches always report the membership sentinel.
///
/// First-seen wins even when a later strategy computed a better score for the
/// same record.
pub fn aggregate(results: Vec<StrategyResult>) -> AggregateResult {
    let mut seen: HashSet<(u64, String, String)> = HashSet::new();
    let mut final_results: Vec<ScoredMatch> = Vec::new();

    for result in &results {
        for m in &result.matches {
            let key = (m.record.id, m.record.name.clone(), m.record.record_type.clone());
            if !seen.insert(key) {
                continue;
            }
            let mut merged = m.clone();
            if merged.strategy.is_binary() {
                merged.score = MatchScore::Membership;
            }
            final_results.push(merged);
        }
    }

    AggregateResult {
        final_results,
        search_data: results,
    }
}
