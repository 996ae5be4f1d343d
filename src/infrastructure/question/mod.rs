//! Question sources

mod csv_loader;

pub use csv_loader::{load_question_cases, read_question_cases};
