//! Keyword extraction domain - text to normalized lemma set

mod extractor;

pub use extractor::{KeywordExtractor, KeywordSet};
