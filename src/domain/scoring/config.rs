//! Scoring thresholds and metric weights

use serde::{Deserialize, Serialize};

/// Relative weight of each signal in the combined score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    #[serde(default = "default_similarity_weight")]
    pub similarity: f64,
    #[serde(default = "default_keyword_match_weight")]
    pub keyword_match: f64,
    #[serde(default = "default_fuzzy_match_weight")]
    pub fuzzy_match: f64,
    #[serde(default = "default_levenshtein_weight")]
    pub levenshtein_similarity: f64,
}

fn default_similarity_weight() -> f64 {
    0.4
}

fn default_keyword_match_weight() -> f64 {
    0.2
}

fn default_fuzzy_match_weight() -> f64 {
    0.2
}

fn default_levenshtein_weight() -> f64 {
    0.2
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            similarity: default_similarity_weight(),
            keyword_match: default_keyword_match_weight(),
            fuzzy_match: default_fuzzy_match_weight(),
            levenshtein_similarity: default_levenshtein_weight(),
        }
    }
}

impl MetricWeights {
    pub fn new(
        similarity: f64,
        keyword_match: f64,
        fuzzy_match: f64,
        levenshtein_similarity: f64,
    ) -> Self {
        Self {
            similarity,
            keyword_match,
            fuzzy_match,
            levenshtein_similarity,
        }
    }

    /// Sum of all weights, the combined score's denominator
    pub fn total(&self) -> f64 {
        self.similarity + self.keyword_match + self.fuzzy_match + self.levenshtein_similarity
    }

    /// Weights paired with their metric names, in report order
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("similarity", self.similarity),
            ("keyword_match", self.keyword_match),
            ("fuzzy_match", self.fuzzy_match),
            ("levenshtein_similarity", self.levenshtein_similarity),
        ]
    }
}

/// Thresholds and weights used by the validation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum fraction of expected keywords found in the answer (0.0 - 1.0)
    #[serde(default = "default_keyword_match_threshold")]
    pub keyword_match_threshold: f64,
    /// Minimum fuzzy ratio for a fuzzy match (0 - 100)
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: f64,
    #[serde(default)]
    pub weights: MetricWeights,
}

fn default_keyword_match_threshold() -> f64 {
    0.5
}

fn default_fuzzy_match_threshold() -> f64 {
    70.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_match_threshold: default_keyword_match_threshold(),
            fuzzy_match_threshold: default_fuzzy_match_threshold(),
            weights: MetricWeights::default(),
        }
    }
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword_match_threshold(mut self, threshold: f64) -> Self {
        self.keyword_match_threshold = threshold;
        self
    }

    pub fn with_fuzzy_match_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_match_threshold = threshold;
        self
    }

    pub fn with_weights(mut self, weights: MetricWeights) -> Self {
        self.weights = weights;
        self
    }
}
