//! Keyword extractor trait and the lemma set it produces

use std::collections::BTreeSet;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Set of normalized keyword lemmas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lemma: impl Into<String>) -> bool {
        self.0.insert(lemma.into())
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.0.contains(lemma)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of lemmas present in both sets
    pub fn overlap(&self, other: &KeywordSet) -> usize {
        self.0.intersection(&other.0).count()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Trait for keyword extraction services.
///
/// Implementations return lower-cased lemmas with stopwords, punctuation and
/// single-character tokens removed.
#[async_trait]
pub trait KeywordExtractor: Send + Sync + Debug {
    /// Extract the lemma set of a text
    async fn lemmas(&self, text: &str) -> Result<KeywordSet, DomainError>;

    /// Get the extractor name
    fn extractor_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let expected: KeywordSet = ["capital", "france", "paris"].into_iter().collect();
        let actual: KeywordSet = ["paris", "france", "city"].into_iter().collect();

        assert_eq!(expected.overlap(&actual), 2);
        assert_eq!(actual.overlap(&expected), 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set: KeywordSet = ["paris", "paris"].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains("paris"));
    }
}
