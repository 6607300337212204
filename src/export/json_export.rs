use crate::error::ExportError;
use crate::models::AggregateResult;
use std::fs::File;
use std::io::BufWriter;

/// Pretty-printed JSON of the merged results and each strategy's raw list.
pub fn export_to_json(result: &AggregateResult, path: &str) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Json(format!("{}: {}", path, e)))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .map_err(|e| ExportError::Json(e.to_string()))
}

/// Compact single-line JSON, used by batch mode.
pub fn to_json_line(result: &AggregateResult) -> Result<String, ExportError> {
    serde_json::to_string(result).map_err(|e| ExportError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, ScoredMatch, StrategyKind, StrategyResult};
    use serde_json::{Value, json};

    #[test]
    fn json_shape() {
        let m = ScoredMatch::scored(Record::new(1, "Cohen", "people").unwrap(), 2.0, StrategyKind::Fuzzy);
        let result = AggregateResult {
            final_results: vec![m.clone()],
            search_data: vec![StrategyResult {
                strategy: StrategyKind::Fuzzy,
                matches: vec![m],
            }],
        };
        let v: Value = serde_json::from_str(&to_json_line(&result).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "final_results": [
                    {"id": 1, "name": "Cohen", "type": "people", "score": 2.0, "strategy": "fuzzy"}
                ],
                "search_data": [
                    {"searchType": "fuzzy", "results": [
                        {"id": 1, "name": "Cohen", "type": "people", "score": 2.0, "strategy": "fuzzy"}
                    ]}
                ]
            })
        );
    }
}
