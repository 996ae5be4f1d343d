//! Report sink implementations

mod csv_sink;

pub use csv_sink::{CsvReportSink, METRICS_FILE, SCORES_FILE};
