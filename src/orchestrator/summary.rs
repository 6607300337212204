//! Per-query summary reporting.

use serde::Serialize;
use std::time::Duration;

use crate::models::{AggregateResult, Language, StrategyKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyCount {
    pub strategy: StrategyKind,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub query: String,
    pub lang: Language,
    pub per_strategy: Vec<StrategyCount>,
    pub final_count: usize,
    pub elapsed_ms: u128,
}

impl SearchSummary {
    pub fn new(query: &str, lang: Language, result: &AggregateResult, elapsed: Duration) -> Self {
        Self {
            query: query.to_string(),
            lang,
            per_strategy: result
                .search_data
                .iter()
                .map(|r| StrategyCount {
                    strategy: r.strategy,
                    matches: r.matches.len(),
                })
                .collect(),
            final_count: result.final_results.len(),
            elapsed_ms: elapsed.as_millis(),
        }
    }

    /// One line, e.g. `exact=1 soundex=3 fuzzy=2 -> 4 unique`.
    pub fn line(&self) -> String {
        let parts: Vec<String> = self
            .per_strategy
            .iter()
            .map(|c| format!("{}={}", c.strategy, c.matches))
            .collect();
        format!("{} -> {} unique", parts.join(" "), self.final_count)
    }

    pub fn log(&self) {
        log::info!(
            "Search {:?} ({}): {} in {} ms",
            self.query,
            self.lang,
            self.line(),
            self.elapsed_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, ScoredMatch, StrategyResult};

    #[test]
    fn summary_line_counts_each_strategy() {
        let r = Record::new(1, "Cohen", "people").unwrap();
        let result = AggregateResult {
            final_results: vec![ScoredMatch::membership(r.clone(), StrategyKind::Exact)],
            search_data: vec![
                StrategyResult {
                    strategy: StrategyKind::Exact,
                    matches: vec![ScoredMatch::membership(r.clone(), StrategyKind::Exact)],
                },
                StrategyResult {
                    strategy: StrategyKind::Fuzzy,
                    matches: vec![ScoredMatch::scored(r, 0.0, StrategyKind::Fuzzy)],
                },
            ],
        };
        let s = SearchSummary::new("cohen", Language::Eng, &result, Duration::from_millis(5));
        assert_eq!(s.line(), "exact=1 fuzzy=1 -> 1 unique");
        assert_eq!(s.elapsed_ms, 5);
    }
}
