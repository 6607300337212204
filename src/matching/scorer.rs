//! Aggregate scoring of a whole candidate name against a multi-token query.

use super::helpers::tokenize;
use super::levenshtein::weighted_distance;

/// Penalty carried by a search token that has no close candidate token.
pub const TOKEN_PENALTY: f64 = 100.0;

/// Score `candidate_name` against `search_tokens`; lower is better.
///
/// Every search token starts at [`TOKEN_PENALTY`]. When some candidate token lies within
/// `max_score` of it, the penalty is replaced by the smallest such distance. An empty
/// query scores `TOKEN_PENALTY`.
pub fn score_candidate(search_tokens: &[String], candidate_name: &str, max_score: f64) -> f64 {
    if search_tokens.is_empty() {
        return TOKEN_PENALTY;
    }
    let candidate_tokens = tokenize(candidate_name);
    let mut score = TOKEN_PENALTY * search_tokens.len() as f64;

    for token in search_tokens {
        let closest = candidate_tokens
            .iter()
            .map(|c| weighted_distance(token, c) as f64)
            .filter(|d| *d <= max_score)
            .min_by(f64::total_cmp);
        if let Some(d) = closest {
            score -= TOKEN_PENALTY;
            score += d;
        }
    }
    score
}

/// Acceptance rule for fuzzy results: at most `max_score` per search token.
pub fn is_accepted(score: f64, max_score: f64, token_count: usize) -> bool {
    score <= max_score * token_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn empty_query_scores_one_hundred() {
        assert_eq!(score_candidate(&[], "Anything at all", 2.0), 100.0);
        assert_eq!(score_candidate(&[], "", 0.0), 100.0);
    }

    #[test]
    fn single_substitution_is_accepted() {
        let q = toks(&["kohen"]);
        let score = score_candidate(&q, "Cohen", 2.0);
        assert_eq!(score, 2.0);
        assert!(is_accepted(score, 2.0, q.len()));
    }

    #[test]
    fn exact_multi_token_scores_zero() {
        let q = toks(&["moshe", "cohen"]);
        assert_eq!(score_candidate(&q, "Cohen, Moshe", 2.0), 0.0);
    }

    #[test]
    fn unmatched_token_keeps_full_penalty() {
        let q = toks(&["moshe", "levi"]);
        let score = score_candidate(&q, "Moshe Cohen", 2.0);
        assert_eq!(score, 100.0);
        assert!(!is_accepted(score, 2.0, q.len()));
    }

    #[test]
    fn closest_candidate_token_wins() {
        let q = toks(&["cohn"]);
        // "cohen" is 1 away, "kohn" is 2 away.
        assert_eq!(score_candidate(&q, "Kohn Cohen", 2.0), 1.0);
    }

    #[test]
    fn distances_above_threshold_are_ignored() {
        let q = toks(&["kohen"]);
        assert_eq!(score_candidate(&q, "Cohen", 1.0), 100.0);
    }

    #[test]
    fn candidate_punctuation_is_stripped() {
        let q = toks(&["obrien"]);
        assert_eq!(score_candidate(&q, "O'Brien (Dublin)", 2.0), 0.0);
    }

    #[test]
    fn hebrew_spelling_noise() {
        let q = toks(&["ירושלים"]);
        assert_eq!(score_candidate(&q, "ירושלם", 2.0), 1.0);
    }
}
