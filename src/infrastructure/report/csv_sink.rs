//! CSV report sink

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::report::{BatchMetrics, ReportSink, METRICS_COLUMNS, SCORE_COLUMNS};
use crate::domain::session::QuestionResult;
use crate::domain::DomainError;

pub const SCORES_FILE: &str = "scores.csv";
pub const METRICS_FILE: &str = "metrics.csv";

const FAILURE_COLUMN: &str = "Failure";

/// Writes `scores.csv` and `metrics.csv` into an output directory
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    output_dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn scores_path(&self) -> PathBuf {
        self.output_dir.join(SCORES_FILE)
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.output_dir.join(METRICS_FILE)
    }

    fn writer(&self, path: &Path) -> Result<csv::Writer<fs::File>, DomainError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            DomainError::report_io(format!(
                "Cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        csv::Writer::from_path(path)
            .map_err(|e| DomainError::report_io(format!("Cannot open {}: {}", path.display(), e)))
    }
}

fn io_error(path: &Path, error: impl std::fmt::Display) -> DomainError {
    DomainError::report_io(format!("Failed writing {}: {}", path.display(), error))
}

impl ReportSink for CsvReportSink {
    fn write_scores(&self, results: &[QuestionResult]) -> Result<(), DomainError> {
        let path = self.scores_path();
        let mut writer = self.writer(&path)?;

        let mut header: Vec<&str> = SCORE_COLUMNS.to_vec();
        header.push(FAILURE_COLUMN);
        writer.write_record(&header).map_err(|e| io_error(&path, e))?;

        for result in results {
            let case = result.case();
            let validation = result.validation();
            let failure = result
                .failure()
                .map(|f| format!("{}: {}", f.stage, f.message))
                .unwrap_or_default();

            writer
                .write_record([
                    case.question().to_string(),
                    validation.actual_answer().to_string(),
                    case.expected_answer().to_string(),
                    validation.similarity_score().to_string(),
                    validation.keyword_match().to_string(),
                    validation.fuzzy_score().to_string(),
                    validation.fuzzy_match().to_string(),
                    validation.expected_data_match().to_string(),
                    validation.levenshtein_similarity().to_string(),
                    validation.combined_score().to_string(),
                    failure,
                ])
                .map_err(|e| io_error(&path, e))?;
        }

        writer.flush().map_err(|e| io_error(&path, e))?;
        info!(path = %path.display(), rows = results.len(), "Wrote per-question scores");
        Ok(())
    }

    fn write_metrics(&self, metrics: &BatchMetrics) -> Result<(), DomainError> {
        let path = self.metrics_path();
        let mut writer = self.writer(&path)?;

        writer.write_record(METRICS_COLUMNS).map_err(|e| io_error(&path, e))?;
        for (name, value) in metrics.rows() {
            writer
                .write_record([name.to_string(), value.to_string()])
                .map_err(|e| io_error(&path, e))?;
        }

        writer.flush().map_err(|e| io_error(&path, e))?;
        info!(path = %path.display(), "Wrote batch metrics");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionCase;
    use crate::domain::report::publish_report;
    use crate::domain::scoring::{MetricWeights, SignalScores, ValidationResult};
    use tempfile::TempDir;

    fn scored() -> QuestionResult {
        let scores = SignalScores::compute(0.9, true, 90, 70.0, 0.5, &MetricWeights::default());
        QuestionResult::scored(
            QuestionCase::new("Capital of France?", "The capital of France is Paris", "Paris"),
            ValidationResult::new("Paris is the capital of France", scores, true),
        )
    }

    fn failed() -> QuestionResult {
        QuestionResult::failed(
            QuestionCase::new("Tallest mountain?", "Mount Everest", "Everest"),
            &DomainError::interaction("Tallest mountain?", "no response content within 20000ms"),
        )
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_scores_sheet_layout() {
        let dir = TempDir::new().unwrap();
        let sink = CsvReportSink::new(dir.path());

        sink.write_scores(&[scored(), failed()]).unwrap();

        let rows = read_rows(&sink.scores_path());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][..10], SCORE_COLUMNS.map(String::from));
        assert_eq!(rows[0][10], "Failure");

        assert_eq!(rows[1][0], "Capital of France?");
        assert_eq!(rows[1][1], "Paris is the capital of France");
        assert_eq!(rows[1][4], "true");
        assert_eq!(rows[1][5], "90");
        assert_eq!(rows[1][10], "");

        assert_eq!(rows[2][4], "false");
        assert_eq!(rows[2][9], "0");
        assert!(rows[2][10].starts_with("ask: "));
    }

    #[test]
    fn test_metrics_sheet_layout() {
        let dir = TempDir::new().unwrap();
        let sink = CsvReportSink::new(dir.path());

        let metrics = publish_report(&sink, &[scored(), failed()]).unwrap();

        let rows = read_rows(&sink.metrics_path());
        let names: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Metric", "Accuracy", "Precision", "Recall", "F1-Score"]);
        assert_eq!(rows[1][1], metrics.accuracy.to_string());
    }

    #[test]
    fn test_output_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("runs").join("latest");
        let sink = CsvReportSink::new(&nested);

        sink.write_scores(&[scored()]).unwrap();

        assert!(nested.join(SCORES_FILE).exists());
    }

    #[test]
    fn test_unwritable_destination_is_report_io() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "not a directory").unwrap();
        let sink = CsvReportSink::new(&blocker);

        let result = sink.write_metrics(&BatchMetrics::default());

        assert!(matches!(result, Err(DomainError::ReportIo { .. })));
    }
}
