//! Search strategies: index-backed membership lookups and the fuzzy full scan.

use rayon::prelude::*;

use super::helpers::tokenize;
use super::phonetic::{PhoneticCode, encode};
use super::scorer::{is_accepted, score_candidate};
use crate::db::RecordIndex;
use crate::error::SearchError;
use crate::models::{Language, Record, ScoredMatch, StrategyKind, StrategyResult};

pub trait SearchStrategy {
    fn kind(&self) -> StrategyKind;

    /// Produce this strategy's matches for already script-normalized query text.
    fn search(&self, text: &str, lang: Language) -> Result<StrategyResult, SearchError>;
}

/// Exact and soundex lookups against an externally built index. Matches carry the
/// membership sentinel score.
pub struct IndexStrategy<'a> {
    index: &'a dyn RecordIndex,
    kind: StrategyKind,
}

impl<'a> IndexStrategy<'a> {
    pub fn exact(index: &'a dyn RecordIndex) -> Self {
        Self {
            index,
            kind: StrategyKind::Exact,
        }
    }

    pub fn soundex(index: &'a dyn RecordIndex) -> Self {
        Self {
            index,
            kind: StrategyKind::Soundex,
        }
    }
}

impl SearchStrategy for IndexStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn search(&self, text: &str, lang: Language) -> Result<StrategyResult, SearchError> {
        let tokens = tokenize(text);
        let records = match self.kind {
            StrategyKind::Soundex => {
                let codes: Vec<PhoneticCode> = tokens
                    .iter()
                    .map(|t| encode(t, lang))
                    .filter(|c| !c.is_unencodable())
                    .collect();
                log::debug!(
                    "soundex codes for {:?}: {:?}",
                    text,
                    codes.iter().map(|c| c.to_string()).collect::<Vec<_>>()
                );
                self.index.lookup_code(lang, &codes)?
            }
            _ => self.index.lookup_text(&tokens)?,
        };
        Ok(StrategyResult {
            strategy: self.kind,
            matches: records
                .into_iter()
                .map(|r| ScoredMatch::membership(r, self.kind))
                .collect(),
        })
    }
}

/// Weighted edit-distance scan over every record name.
pub struct FuzzyStrategy<'a> {
    records: &'a [Record],
    max_score: f64,
    parallel: bool,
}

impl<'a> FuzzyStrategy<'a> {
    pub fn new(records: &'a [Record], max_score: f64) -> Self {
        Self {
            records,
            max_score,
            parallel: false,
        }
    }

    /// Score records on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn score_one(&self, tokens: &[String], record: &Record) -> Option<ScoredMatch> {
        let score = score_candidate(tokens, &record.name, self.max_score);
        is_accepted(score, self.max_score, tokens.len())
            .then(|| ScoredMatch::scored(record.clone(), score, StrategyKind::Fuzzy))
    }
}

impl SearchStrategy for FuzzyStrategy<'_> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fuzzy
    }

    fn search(&self, text: &str, _lang: Language) -> Result<StrategyResult, SearchError> {
        // A blank query means no filter: every record, unscored.
        if text.trim().is_empty() {
            return Ok(StrategyResult {
                strategy: StrategyKind::Fuzzy,
                matches: self
                    .records
                    .iter()
                    .map(|r| ScoredMatch::membership(r.clone(), StrategyKind::Fuzzy))
                    .collect(),
            });
        }

        // Punctuation-only text tokenizes to nothing; the acceptance rule then
        // rejects every record.
        let tokens = tokenize(text);
        let matches: Vec<ScoredMatch> = if self.parallel {
            self.records
                .par_iter()
                .filter_map(|r| self.score_one(&tokens, r))
                .collect()
        } else {
            self.records
                .iter()
                .filter_map(|r| self.score_one(&tokens, r))
                .collect()
        };
        Ok(StrategyResult {
            strategy: StrategyKind::Fuzzy,
            matches,
        })
    }
}

/// Instantiate the strategy for `kind` over the shared, read-only inputs.
pub fn build_strategy<'a>(
    kind: StrategyKind,
    index: &'a dyn RecordIndex,
    records: &'a [Record],
    max_score: f64,
    parallel_fuzzy: bool,
) -> Box<dyn SearchStrategy + 'a> {
    match kind {
        StrategyKind::Exact => Box::new(IndexStrategy::exact(index)),
        StrategyKind::Soundex => Box::new(IndexStrategy::soundex(index)),
        StrategyKind::Fuzzy => {
            Box::new(FuzzyStrategy::new(records, max_score).parallel(parallel_fuzzy))
        }
    }
}
