//! Reads question cases from a CSV document

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::domain::question::QuestionCase;
use crate::domain::DomainError;

/// Load question cases from a CSV file with `Question`, `Expected Answer` and
/// `Expected Data` headers, preserving row order
pub fn load_question_cases(path: impl AsRef<Path>) -> Result<Vec<QuestionCase>, DomainError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        DomainError::validation(format!("Cannot open question file {}: {}", path.display(), e))
    })?;

    let cases = read_question_cases(file)?;
    info!(path = %path.display(), count = cases.len(), "Loaded question cases");

    Ok(cases)
}

/// Parse question cases from any CSV reader
pub fn read_question_cases<R: Read>(reader: R) -> Result<Vec<QuestionCase>, DomainError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let cases = reader
        .deserialize::<QuestionCase>()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(|e| DomainError::validation(format!("Invalid question row {}: {}", index + 1, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if cases.is_empty() {
        return Err(DomainError::validation("Question file contains no questions"));
    }

    Ok(cases)
}
