//! Rule-based keyword extractor

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stop_word;
use crate::domain::keywords::{KeywordExtractor, KeywordSet};
use crate::domain::DomainError;

/// Extracts content-word lemmas with a stop list and light suffix folding.
///
/// A token is kept when it is not a stop word, has more than one character
/// and carries at least one alphanumeric character once a trailing possessive
/// is removed.
#[derive(Debug, Clone, Default)]
pub struct LexicalKeywordExtractor;

impl LexicalKeywordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Lemmas of a text, synchronously
    pub fn extract(&self, text: &str) -> KeywordSet {
        text.unicode_words()
            .filter_map(|word| {
                let lower = word.to_lowercase();
                let token = strip_possessive(&lower);

                if token.chars().count() <= 1 || is_stop_word(token) {
                    return None;
                }
                if !token.chars().any(char::is_alphanumeric) {
                    return None;
                }

                Some(lemmatize(token))
            })
            .collect()
    }
}

#[async_trait]
impl KeywordExtractor for LexicalKeywordExtractor {
    async fn lemmas(&self, text: &str) -> Result<KeywordSet, DomainError> {
        Ok(self.extract(text))
    }

    fn extractor_name(&self) -> &'static str {
        "lexical"
    }
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

fn lemmatize(word: &str) -> String {
    if word.chars().any(|c| c.is_numeric()) {
        return word.to_string();
    }

    let len = word.chars().count();

    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{}ss", stem);
    }
    if len > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}
