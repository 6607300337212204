pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod util;

pub use db::{InvertedIndex, RecordIndex, RecordStore, load_records};
pub use error::{IndexError, SearchError, StoreError};
pub use matching::{PhoneticCode, aggregate, encode, score_candidate, weighted_distance};
pub use models::{
    AggregateResult, Language, MatchScore, Record, ScoredMatch, SearchQuery, StrategyKind,
    StrategyResult,
};
pub use normalize::normalize_script;
pub use orchestrator::{SearchOptions, SearchOutcome, run_search};
