//! Binary labels derived from the boolean signals
//!
//! Ground truth requires all three boolean signals, the prediction needs any one
//! of them. The prediction is therefore looser than the ground truth by
//! construction, which caps precision below 1.0 whenever the signals disagree.
//! Both derivations live here so a change of intent touches one place.

use crate::domain::scoring::ValidationResult;

/// `keyword_match AND fuzzy_match AND expected_data_match`
pub fn ground_truth_label(result: &ValidationResult) -> bool {
    result.keyword_match() && result.fuzzy_match() && result.expected_data_match()
}

/// `keyword_match OR fuzzy_match OR expected_data_match`
pub fn predicted_label(result: &ValidationResult) -> bool {
    result.keyword_match() || result.fuzzy_match() || result.expected_data_match()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::{MetricWeights, SignalScores};

    fn result(keyword: bool, fuzzy: bool, data: bool) -> ValidationResult {
        let fuzzy_score = if fuzzy { 90 } else { 10 };
        let scores = SignalScores::compute(0.5, keyword, fuzzy_score, 70.0, 0.5, &MetricWeights::default());
        ValidationResult::new("answer", scores, data)
    }

    #[test]
    fn test_all_signals_agree() {
        assert!(ground_truth_label(&result(true, true, true)));
        assert!(predicted_label(&result(true, true, true)));

        assert!(!ground_truth_label(&result(false, false, false)));
        assert!(!predicted_label(&result(false, false, false)));
    }

    #[test]
    fn test_single_signal_predicts_but_is_not_truth() {
        for r in [
            result(true, false, false),
            result(false, true, false),
            result(false, false, true),
        ] {
            assert!(!ground_truth_label(&r));
            assert!(predicted_label(&r));
        }
    }
}
