//! Batch classification metrics

use serde::{Deserialize, Serialize};

use super::{ground_truth_label, predicted_label};
use crate::domain::scoring::ValidationResult;

/// Counts of label agreement over a batch, positive meaning `true`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally (ground truth, predicted) label pairs
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = (bool, bool)>,
    {
        labels
            .into_iter()
            .fold(Self::default(), |mut matrix, (truth, predicted)| {
                match (truth, predicted) {
                    (true, true) => matrix.true_positives += 1,
                    (false, true) => matrix.false_positives += 1,
                    (false, false) => matrix.true_negatives += 1,
                    (true, false) => matrix.false_negatives += 1,
                }
                matrix
            })
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }
}

/// Accuracy, precision, recall and F1 over a batch; a zero denominator yields 0.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl BatchMetrics {
    /// Compute metrics over the full ordered batch of validation results
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ValidationResult>,
    {
        let matrix = ConfusionMatrix::from_labels(
            results
                .into_iter()
                .map(|r| (ground_truth_label(r), predicted_label(r))),
        );
        Self::from_confusion(&matrix)
    }

    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let accuracy = ratio(matrix.correct(), matrix.total());
        let precision = ratio(
            matrix.true_positives,
            matrix.true_positives + matrix.false_positives,
        );
        let recall = ratio(
            matrix.true_positives,
            matrix.true_positives + matrix.false_negatives,
        );
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }

    /// Metric rows in report order
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Accuracy", self.accuracy),
            ("Precision", self.precision),
            ("Recall", self.recall),
            ("F1-Score", self.f1),
        ]
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
