//! Scoring configuration validation

use thiserror::Error;

use super::{MetricWeights, ScoringConfig};

/// Validation errors for scoring configuration
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoringConfigError {
    #[error("keyword_match_threshold {0} must be between 0 and 1")]
    KeywordThresholdOutOfRange(f64),

    #[error("fuzzy_match_threshold {0} must be between 0 and 100")]
    FuzzyThresholdOutOfRange(f64),

    #[error("weight '{name}' must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("sum of metric weights must be greater than zero")]
    ZeroWeightSum,
}

/// Validate a scoring configuration
pub fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ScoringConfigError> {
    let keyword = config.keyword_match_threshold;
    if !(0.0..=1.0).contains(&keyword) {
        return Err(ScoringConfigError::KeywordThresholdOutOfRange(keyword));
    }

    let fuzzy = config.fuzzy_match_threshold;
    if !(0.0..=100.0).contains(&fuzzy) {
        return Err(ScoringConfigError::FuzzyThresholdOutOfRange(fuzzy));
    }

    validate_weights(&config.weights)
}

/// Validate metric weights
pub fn validate_weights(weights: &MetricWeights) -> Result<(), ScoringConfigError> {
    for (name, value) in weights.named() {
        if !value.is_finite() || value < 0.0 {
            return Err(ScoringConfigError::InvalidWeight { name, value });
        }
    }

    if weights.total() <= 0.0 {
        return Err(ScoringConfigError::ZeroWeightSum);
    }

    Ok(())
}
