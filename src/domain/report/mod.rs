//! Report domain - batch classification metrics and the sink they are handed to

mod labels;
mod metrics;
mod sink;

pub use labels::{ground_truth_label, predicted_label};
pub use metrics::{BatchMetrics, ConfusionMatrix};
pub use sink::{publish_report, ReportSink, METRICS_COLUMNS, SCORE_COLUMNS};

#[cfg(test)]
pub use sink::MockReportSink;
