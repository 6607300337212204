use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::models::{DEFAULT_MAX_SCORE, StrategyKind, parse_strategy_list};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DataConfig {
    pub data_dir: Option<String>,
    pub files: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            files: vec![
                "imprint.csv".into(),
                "people.csv".into(),
                "place.csv".into(),
            ],
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchConfig {
    pub max_score: f64,
    pub strategies: Vec<StrategyKind>,
    pub parallel_fuzzy: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            strategies: StrategyKind::all(),
            parallel_fuzzy: false,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ExportConfig {
    pub out_path: Option<String>,
    pub format: Option<String>, // json|csv
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_path: None,
            format: Some("json".into()),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Defaults overlaid with `NAME_SEARCH_*` variables. The process environment wins
    /// over values read from a `.env` file.
    pub fn from_env(env_map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| std::env::var(key).ok().or_else(|| env_map.get(key).cloned());
        let mut cfg = Self::default();

        if let Some(dir) = get("NAME_SEARCH_DATA_DIR") {
            cfg.data.data_dir = Some(dir);
        }
        if let Some(files) = get("NAME_SEARCH_FILES") {
            cfg.data.files = files
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = get("NAME_SEARCH_MAX_SCORE") {
            cfg.search.max_score = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "search.max_score",
                reason: format!("'{}' is not a number", v),
            })?;
        }
        if let Some(v) = get("NAME_SEARCH_STRATEGIES") {
            cfg.search.strategies =
                parse_strategy_list(&v).map_err(|e| ConfigError::InvalidValue {
                    field: "search.strategies",
                    reason: e.to_string(),
                })?;
        }
        if let Some(v) = get("NAME_SEARCH_PARALLEL_FUZZY") {
            cfg.search.parallel_fuzzy = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = get("NAME_SEARCH_FORMAT") {
            cfg.export.format = Some(v.trim().to_ascii_lowercase());
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.files.is_empty() {
            return Err(ConfigError::MissingField { field: "data.files" });
        }
        if !self.search.max_score.is_finite() || self.search.max_score < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_score",
                reason: format!("{} must be a non-negative number", self.search.max_score),
            });
        }
        if self.search.strategies.is_empty() {
            return Err(ConfigError::MissingField {
                field: "search.strategies",
            });
        }
        if let Some(ref fmt) = self.export.format {
            match fmt.as_str() {
                "json" | "csv" => {}
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "export.format",
                        reason: format!("unsupported: {}", other),
                    });
                }
            }
        }
        Ok(())
    }
}
