//! Batch service - runs a question batch and publishes its report

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::agent::{ChatAgent, Credentials};
use crate::domain::question::QuestionCase;
use crate::domain::report::{publish_report, BatchMetrics, ReportSink};
use crate::domain::scoring::ValidationEngine;
use crate::domain::session::{SessionDriver, SessionOutcome};
use crate::domain::DomainError;

/// Summary of a finished batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub questions: usize,
    pub answered: usize,
    pub failed: usize,
    pub metrics: BatchMetrics,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run {} finished at {}", self.run_id, self.finished_at.to_rfc3339())?;
        writeln!(
            f,
            "Questions: {} answered, {} failed, {} total",
            self.answered, self.failed, self.questions
        )?;
        for (name, value) in self.metrics.rows() {
            writeln!(f, "{:<10} {:.4}", name, value)?;
        }
        Ok(())
    }
}

/// Runs one batch through a session and the report sink
pub struct BatchService<'a> {
    engine: &'a ValidationEngine,
    sink: &'a dyn ReportSink,
    run_id: Uuid,
}

impl<'a> BatchService<'a> {
    pub fn new(engine: &'a ValidationEngine, sink: &'a dyn ReportSink) -> Self {
        Self {
            engine,
            sink,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Drive the session over every case and publish the report.
    ///
    /// When the session aborts after login, the results gathered so far are
    /// written before the aborting error is returned.
    pub async fn run<A: ChatAgent>(
        &self,
        driver: SessionDriver<A>,
        credentials: &Credentials,
        cases: &[QuestionCase],
    ) -> Result<BatchSummary, DomainError> {
        let started_at = Utc::now();
        info!(run_id = %self.run_id, questions = cases.len(), "Starting batch");

        let outcome = driver.run(credentials, cases, self.engine).await.inspect_err(|e| {
            error!(run_id = %self.run_id, stage = e.stage(), "Batch failed before any question: {}", e);
        })?;

        let SessionOutcome { results, abort } = outcome;

        if let Some(abort) = abort {
            error!(
                run_id = %self.run_id,
                stage = abort.stage(),
                completed = results.len(),
                "Batch aborted: {}",
                abort
            );

            if let Err(e) = publish_report(self.sink, &results) {
                warn!("Failed to write partial report: {}", e);
            } else {
                info!(rows = results.len(), "Partial report written");
            }
            return Err(abort);
        }

        let metrics = publish_report(self.sink, &results)?;
        let failed = results.iter().filter(|r| r.is_failed()).count();

        let summary = BatchSummary {
            run_id: self.run_id,
            started_at,
            finished_at: Utc::now(),
            questions: cases.len(),
            answered: results.len() - failed,
            failed,
            metrics,
        };

        info!(
            run_id = %self.run_id,
            accuracy = summary.metrics.accuracy,
            f1 = summary.metrics.f1,
            "Batch finished"
        );

        Ok(summary)
    }
}
