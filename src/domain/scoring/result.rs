//! Per-question scoring results

use serde::{Deserialize, Serialize};

/// The four signals and their weighted blend for one expected/actual pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    /// Cosine similarity of the two embeddings (-1.0 - 1.0)
    pub similarity_score: f64,
    pub keyword_match: bool,
    /// Fuzzy ratio of the lower-cased texts (0 - 100)
    pub fuzzy_score: u8,
    pub fuzzy_match: bool,
    /// Normalized inverse edit distance (0.0 - 1.0)
    pub levenshtein_similarity: f64,
    pub combined_score: f64,
}

/// Validation outcome for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    actual_answer: String,
    #[serde(flatten)]
    scores: SignalScores,
    expected_data_match: bool,
}

impl ValidationResult {
    pub fn new(actual_answer: impl Into<String>, scores: SignalScores, expected_data_match: bool) -> Self {
        Self {
            actual_answer: actual_answer.into(),
            scores,
            expected_data_match,
        }
    }

    /// Sentinel result for a question that could not be asked or scored.
    ///
    /// Every signal is false or zero, so the question counts as negative in both
    /// derived label sequences.
    pub fn failed(actual_answer: impl Into<String>) -> Self {
        Self::new(
            actual_answer,
            SignalScores {
                similarity_score: 0.0,
                keyword_match: false,
                fuzzy_score: 0,
                fuzzy_match: false,
                levenshtein_similarity: 0.0,
                combined_score: 0.0,
            },
            false,
        )
    }

    pub fn actual_answer(&self) -> &str {
        &self.actual_answer
    }

    pub fn scores(&self) -> &SignalScores {
        &self.scores
    }

    pub fn similarity_score(&self) -> f64 {
        self.scores.similarity_score
    }

    pub fn keyword_match(&self) -> bool {
        self.scores.keyword_match
    }

    pub fn fuzzy_score(&self) -> u8 {
        self.scores.fuzzy_score
    }

    pub fn fuzzy_match(&self) -> bool {
        self.scores.fuzzy_match
    }

    pub fn levenshtein_similarity(&self) -> f64 {
        self.scores.levenshtein_similarity
    }

    pub fn combined_score(&self) -> f64 {
        self.scores.combined_score
    }

    pub fn expected_data_match(&self) -> bool {
        self.expected_data_match
    }
}
