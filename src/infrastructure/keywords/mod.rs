//! Keyword extractor implementations

mod lexical;
mod stopwords;

pub use lexical::LexicalKeywordExtractor;
