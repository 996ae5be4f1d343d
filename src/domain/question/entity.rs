//! Question case entity

use serde::{Deserialize, Serialize};

/// A single question with the answer the agent is expected to give.
///
/// Cases are loaded once per run and never mutated; their order drives the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCase {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Expected Answer")]
    expected_answer: String,
    /// Fragment that must appear verbatim (case-insensitively) in the answer
    #[serde(rename = "Expected Data", default)]
    expected_data: String,
}

impl QuestionCase {
    pub fn new(
        question: impl Into<String>,
        expected_answer: impl Into<String>,
        expected_data: impl ToString,
    ) -> Self {
        Self {
            question: question.into(),
            expected_answer: expected_answer.into(),
            expected_data: expected_data.to_string(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }

    pub fn expected_data(&self) -> &str {
        &self.expected_data
    }
}
