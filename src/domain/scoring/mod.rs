//! Scoring domain - multi-signal comparison of an actual answer with the expected one
//!
//! The combined score is a weighted confidence blend of heterogeneous signals
//! (a cosine similarity, two booleans counted as 0/1 and a normalized edit
//! similarity). It is not a probability and should not be read as one.

mod config;
mod engine;
mod result;
mod signals;
mod validation;

pub use config::{MetricWeights, ScoringConfig};
pub use engine::ValidationEngine;
pub use result::{SignalScores, ValidationResult};
pub use signals::{
    combined_score, expected_data_match, fuzzy_ratio, fuzzy_score, keyword_match,
    keyword_overlap_ratio, levenshtein_similarity,
};
pub use validation::{validate_scoring_config, validate_weights, ScoringConfigError};
