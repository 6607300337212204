use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("expected a .csv file, got: {0}")]
    FileType(String),
    #[error("no valid records loaded from {0}")]
    Empty(String),
    #[error("record id must be positive (record {name:?})")]
    InvalidId { name: String },
    #[error("csv error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index field not available: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{field}: expected {expected}, got {found}")]
    TypeKind {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{0}' is not a valid search type")]
    UnknownStrategy(String),
    #[error("'{0}' is not a supported language (expected 'heb' or 'eng')")]
    UnknownLanguage(String),
    #[error("max score must be a finite non-negative number, got {0}")]
    InvalidMaxScore(f64),
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export error: {0}")]
    Csv(String),
    #[error("json export error: {0}")]
    Json(String),
}
