use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::config::SearchConfig;
use crate::error::{SearchError, StoreError};

/// Score reported by strategies that only know membership (exact/soundex).
pub const MEMBERSHIP_SCORE: f64 = -1.0;

/// Default per-token edit-distance budget for fuzzy search.
pub const DEFAULT_MAX_SCORE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
}

impl Record {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        if id == 0 {
            return Err(StoreError::InvalidId { name });
        }
        Ok(Self {
            id,
            name,
            record_type: record_type.into(),
        })
    }

    /// Identity used for de-duplication across strategies.
    pub fn key(&self) -> (u64, &str, &str) {
        (self.id, self.name.as_str(), self.record_type.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Heb,
    Eng,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heb => "heb",
            Self::Eng => "eng",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Heb => Self::Eng,
            Self::Eng => Self::Heb,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heb" => Ok(Self::Heb),
            "eng" => Ok(Self::Eng),
            other => Err(SearchError::UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Exact,
    Soundex,
    #[value(alias = "levenshtein")]
    Fuzzy,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Soundex => "soundex",
            Self::Fuzzy => "fuzzy",
        }
    }

    /// Exact and soundex only report membership; fuzzy carries a real distance.
    pub fn is_binary(&self) -> bool {
        !matches!(self, Self::Fuzzy)
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Exact, Self::Soundex, Self::Fuzzy]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "soundex" => Ok(Self::Soundex),
            "fuzzy" | "levenshtein" => Ok(Self::Fuzzy),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Parse a comma separated strategy list such as `"exact,fuzzy"`.
pub fn parse_strategy_list(s: &str) -> Result<Vec<StrategyKind>, SearchError> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(StrategyKind::from_str)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub lang: Language,
    pub strategies: Vec<StrategyKind>,
    pub max_score: f64,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, lang: Language) -> Self {
        Self {
            text: text.into(),
            lang,
            strategies: StrategyKind::all(),
            max_score: DEFAULT_MAX_SCORE,
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.max_score = max_score;
        self
    }

    /// Build a query from a JSON request of the shape
    /// `{"search_text": "...", "lang": "heb", "search_types": ["exact"], "max_score": 2.0}`.
    /// Missing `search_types` and `max_score` fall back to `defaults`.
    pub fn from_value(v: &Value, defaults: &SearchConfig) -> Result<Self, SearchError> {
        let text = expect_str(v.get("search_text"), "search_text")?;
        let lang: Language = expect_str(v.get("lang"), "lang")?.parse()?;

        let strategies = match v.get("search_types") {
            None | Some(Value::Null) => defaults.strategies.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| expect_str(Some(item), "search_types")?.parse())
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(SearchError::TypeKind {
                    field: "search_types",
                    expected: "list",
                    found: json_kind(other),
                });
            }
        };

        let max_score = match v.get("max_score") {
            None | Some(Value::Null) => defaults.max_score,
            Some(Value::Number(n)) => n.as_f64().unwrap_or(defaults.max_score),
            Some(other) => {
                return Err(SearchError::TypeKind {
                    field: "max_score",
                    expected: "number",
                    found: json_kind(other),
                });
            }
        };

        Ok(Self {
            text: text.to_string(),
            lang,
            strategies,
            max_score,
        })
    }
}

fn expect_str<'a>(v: Option<&'a Value>, field: &'static str) -> Result<&'a str, SearchError> {
    match v {
        Some(Value::String(s)) => Ok(s.as_str()),
        other => Err(SearchError::TypeKind {
            field,
            expected: "string",
            found: other.map(json_kind).unwrap_or("nothing"),
        }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchScore {
    Membership,
    Distance(f64),
}

impl MatchScore {
    pub fn value(&self) -> f64 {
        match self {
            Self::Membership => MEMBERSHIP_SCORE,
            Self::Distance(d) => *d,
        }
    }
}

impl Serialize for MatchScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub record: Record,
    pub score: MatchScore,
    pub strategy: StrategyKind,
}

impl ScoredMatch {
    pub fn membership(record: Record, strategy: StrategyKind) -> Self {
        Self {
            record,
            score: MatchScore::Membership,
            strategy,
        }
    }

    pub fn scored(record: Record, score: f64, strategy: StrategyKind) -> Self {
        Self {
            record,
            score: MatchScore::Distance(score),
            strategy,
        }
    }
}

/// Raw output of a single strategy, kept unmerged for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyResult {
    #[serde(rename = "searchType")]
    pub strategy: StrategyKind,
    #[serde(rename = "results")]
    pub matches: Vec<ScoredMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub final_results: Vec<ScoredMatch>,
    pub search_data: Vec<StrategyResult>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.final_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.final_results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn record_rejects_zero_id() {
        assert!(Record::new(0, "x", "people").is_err());
        assert_eq!(Record::new(7, "x", "people").unwrap().id, 7);
    }

    #[test]
    fn strategy_names_parse() {
        assert_eq!("soundex".parse::<StrategyKind>().unwrap(), StrategyKind::Soundex);
        assert_eq!(
            parse_strategy_list("exact, fuzzy").unwrap(),
            vec![StrategyKind::Exact, StrategyKind::Fuzzy]
        );
        assert!(matches!(
            "regex".parse::<StrategyKind>(),
            Err(SearchError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn query_from_json_request() {
        let request = json!({
            "search_text": "Kohen",
            "lang": "eng",
            "search_types": ["fuzzy"],
            "max_score": 3
        });
        let q = SearchQuery::from_value(&request, &defaults()).unwrap();
        assert_eq!(q.text, "Kohen");
        assert_eq!(q.lang, Language::Eng);
        assert_eq!(q.strategies, vec![StrategyKind::Fuzzy]);
        assert_eq!(q.max_score, 3.0);
    }

    #[test]
    fn query_from_json_defaults() {
        let q = SearchQuery::from_value(&json!({"search_text": "משה", "lang": "heb"}), &defaults())
            .unwrap();
        assert_eq!(q.strategies, StrategyKind::all());
        assert_eq!(q.max_score, DEFAULT_MAX_SCORE);
    }

    #[test]
    fn query_from_json_takes_configured_defaults() {
        let configured = SearchConfig {
            max_score: 3.0,
            strategies: vec![StrategyKind::Fuzzy],
            parallel_fuzzy: false,
        };
        let q = SearchQuery::from_value(&json!({"search_text": "kohen", "lang": "eng"}), &configured)
            .unwrap();
        assert_eq!(q.max_score, 3.0);
        assert_eq!(q.strategies, vec![StrategyKind::Fuzzy]);

        // Fields present in the request still win.
        let q = SearchQuery::from_value(
            &json!({"search_text": "kohen", "lang": "eng", "max_score": 1, "search_types": ["exact"]}),
            &configured,
        )
        .unwrap();
        assert_eq!(q.max_score, 1.0);
        assert_eq!(q.strategies, vec![StrategyKind::Exact]);
    }

    #[test]
    fn query_from_json_type_errors() {
        let err = SearchQuery::from_value(&json!({"search_text": 12, "lang": "eng"}), &defaults())
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::TypeKind {
                field: "search_text",
                found: "number",
                ..
            }
        ));
        let request = json!({"search_text": "a", "lang": "eng", "search_types": "exact"});
        let err = SearchQuery::from_value(&request, &defaults()).unwrap_err();
        assert!(matches!(err, SearchError::TypeKind { field: "search_types", .. }));
    }

    #[test]
    fn query_from_json_value_errors() {
        let request = json!({
            "search_text": "a",
            "lang": "eng",
            "search_types": ["exact", "metaphone"]
        });
        let err = SearchQuery::from_value(&request, &defaults()).unwrap_err();
        assert!(matches!(err, SearchError::UnknownStrategy(ref s) if s == "metaphone"));
        let err = SearchQuery::from_value(&json!({"search_text": "a", "lang": "fra"}), &defaults())
            .unwrap_err();
        assert!(matches!(err, SearchError::UnknownLanguage(_)));
    }

    #[test]
    fn scored_match_serializes_flat() {
        let m = ScoredMatch::membership(Record::new(3, "Cohen", "people").unwrap(), StrategyKind::Exact);
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(
            v,
            json!({"id": 3, "name": "Cohen", "type": "people", "score": -1.0, "strategy": "exact"})
        );
    }
}
