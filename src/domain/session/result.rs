//! Per-question results and the outcome of a session

use serde::Serialize;

use crate::domain::question::QuestionCase;
use crate::domain::scoring::ValidationResult;
use crate::domain::DomainError;

/// Why a question has no real score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFailure {
    pub stage: String,
    pub message: String,
}

impl From<&DomainError> for QuestionFailure {
    fn from(error: &DomainError) -> Self {
        Self {
            stage: error.stage().to_string(),
            message: error.to_string(),
        }
    }
}

/// A question paired with its validation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    case: QuestionCase,
    validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<QuestionFailure>,
}

impl QuestionResult {
    pub fn scored(case: QuestionCase, validation: ValidationResult) -> Self {
        Self {
            case,
            validation,
            failure: None,
        }
    }

    /// Sentinel entry for a question whose failure was isolated
    pub fn failed(case: QuestionCase, error: &DomainError) -> Self {
        Self {
            case,
            validation: ValidationResult::failed(""),
            failure: Some(QuestionFailure::from(error)),
        }
    }

    pub fn case(&self) -> &QuestionCase {
        &self.case
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn failure(&self) -> Option<&QuestionFailure> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Everything a session produced.
///
/// `abort` holds the failure that ended the queue early; `results` then holds the
/// questions completed before it.
#[derive(Debug)]
pub struct SessionOutcome {
    pub results: Vec<QuestionResult>,
    pub abort: Option<DomainError>,
}

impl SessionOutcome {
    pub fn completed(results: Vec<QuestionResult>) -> Self {
        Self {
            results,
            abort: None,
        }
    }

    pub fn aborted(results: Vec<QuestionResult>, error: DomainError) -> Self {
        Self {
            results,
            abort: Some(error),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Validation results in question order, as consumed by the aggregate reporter
    pub fn validations(&self) -> Vec<&ValidationResult> {
        self.results.iter().map(QuestionResult::validation).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_question_result() {
        let case = QuestionCase::new("Q", "A", "D");
        let error = DomainError::interaction("Q", "no response within 20000ms");

        let result = QuestionResult::failed(case, &error);

        assert!(result.is_failed());
        let failure = result.failure().unwrap();
        assert_eq!(failure.stage, "ask");
        assert!(failure.message.contains("20000ms"));
        assert!(!result.validation().keyword_match());
    }

    #[test]
    fn test_outcome_counts() {
        let ok = QuestionResult::scored(QuestionCase::new("Q1", "A", ""), ValidationResult::failed("x"));
        let bad = QuestionResult::failed(
            QuestionCase::new("Q2", "A", ""),
            &DomainError::provider("embedding", "down"),
        );

        let outcome = SessionOutcome::completed(vec![ok, bad]);

        assert!(!outcome.is_aborted());
        assert_eq!(outcome.failed_count(), 1);
        assert_eq!(outcome.validations().len(), 2);
    }
}
