//! Report sink trait

use crate::domain::session::QuestionResult;
use crate::domain::DomainError;

use super::BatchMetrics;

#[cfg(test)]
use mockall::automock;

/// Per-question sheet columns, in order
pub const SCORE_COLUMNS: [&str; 10] = [
    "Question",
    "Actual Answer",
    "Expected Answer",
    "Similarity Score",
    "Keyword Match",
    "Fuzzy Score",
    "Fuzzy Match",
    "Expected Data Match",
    "Levenshtein Similarity",
    "Combined Score",
];

/// Aggregate sheet columns
pub const METRICS_COLUMNS: [&str; 2] = ["Metric", "Value"];

/// Destination for the two report artifacts of a run
#[cfg_attr(test, automock)]
pub trait ReportSink: Send + Sync {
    /// Write the per-question sheet
    fn write_scores(&self, results: &[QuestionResult]) -> Result<(), DomainError>;

    /// Write the aggregate metrics sheet
    fn write_metrics(&self, metrics: &BatchMetrics) -> Result<(), DomainError>;
}

/// Compute the batch metrics and write both artifacts.
///
/// Results are written first so a metrics failure still leaves the per-question
/// sheet behind.
pub fn publish_report(
    sink: &dyn ReportSink,
    results: &[QuestionResult],
) -> Result<BatchMetrics, DomainError> {
    let metrics = BatchMetrics::from_results(results.iter().map(QuestionResult::validation));

    sink.write_scores(results)?;
    sink.write_metrics(&metrics)?;

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionCase;
    use crate::domain::scoring::{MetricWeights, SignalScores, ValidationResult};

    fn scored(question: &str) -> QuestionResult {
        let scores = SignalScores::compute(0.9, true, 90, 70.0, 0.8, &MetricWeights::default());
        QuestionResult::scored(
            QuestionCase::new(question, "expected", "data"),
            ValidationResult::new("expected data", scores, true),
        )
    }

    #[test]
    fn test_publish_writes_scores_then_metrics() {
        let mut sink = MockReportSink::new();
        let mut sequence = mockall::Sequence::new();

        sink.expect_write_scores()
            .withf(|results| results.len() == 2)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));
        sink.expect_write_metrics()
            .withf(|metrics| metrics.accuracy == 1.0)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));

        let metrics = publish_report(&sink, &[scored("Q1"), scored("Q2")]).unwrap();

        assert_eq!(metrics.precision, 1.0);
    }

    #[test]
    fn test_publish_stops_on_score_write_failure() {
        let mut sink = MockReportSink::new();

        sink.expect_write_scores()
            .returning(|_| Err(DomainError::report_io("disk full")));
        sink.expect_write_metrics().times(0);

        let result = publish_report(&sink, &[scored("Q1")]);

        assert!(matches!(result, Err(DomainError::ReportIo { .. })));
    }
}
