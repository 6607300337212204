//! Name matching: phonetic codes, weighted edit distance, candidate scoring,
//! search strategies and result aggregation.

pub mod aggregate;
pub mod helpers;
pub mod levenshtein;
pub mod phonetic;
pub mod scorer;
pub mod strategy;

pub use aggregate::aggregate;
pub use helpers::tokenize;
pub use levenshtein::weighted_distance;
pub use phonetic::{PhoneticCode, PhoneticTables, encode, encode_name};
pub use scorer::{is_accepted, score_candidate};
pub use strategy::{FuzzyStrategy, IndexStrategy, SearchStrategy, build_strategy};
