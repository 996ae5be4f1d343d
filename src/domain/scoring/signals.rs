//! Pure signal functions used by the validation engine

use std::fmt::Display;

use super::{MetricWeights, SignalScores};
use crate::domain::keywords::KeywordSet;

/// Fraction of expected keywords present in the actual keywords.
///
/// `None` when the expected set is empty.
pub fn keyword_overlap_ratio(expected: &KeywordSet, actual: &KeywordSet) -> Option<f64> {
    if expected.is_empty() {
        return None;
    }

    Some(expected.overlap(actual) as f64 / expected.len() as f64)
}

/// Keyword match at `overlap / |expected| >= threshold`, boundary inclusive.
///
/// An empty expected keyword set never matches: there is nothing to confirm.
pub fn keyword_match(expected: &KeywordSet, actual: &KeywordSet, threshold: f64) -> bool {
    keyword_overlap_ratio(expected, actual).is_some_and(|ratio| ratio >= threshold)
}

/// Indel-normalized similarity ratio of two strings in 0 - 100.
///
/// `round(100 * (1 - indel / (|a| + |b|)))` counted in characters, halves rounding
/// to even. Equal strings score 100 (including two empty strings); an empty string
/// against a non-empty one scores 0.
pub fn fuzzy_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = (a.len() + b.len()) as f64;
    let matched = 2 * longest_common_subsequence(&a, &b);

    (100.0 * matched as f64 / total).round_ties_even() as u8
}

/// Fuzzy ratio of the lower-cased texts
pub fn fuzzy_score(expected: &str, actual: &str) -> u8 {
    fuzzy_ratio(&expected.to_lowercase(), &actual.to_lowercase())
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// `1 - edit_distance / max(len)` in characters; two empty strings are identical (1.0)
pub fn levenshtein_similarity(expected: &str, actual: &str) -> f64 {
    let longest = expected.chars().count().max(actual.chars().count());
    if longest == 0 {
        return 1.0;
    }

    1.0 - strsim::levenshtein(expected, actual) as f64 / longest as f64
}

/// Case-insensitive substring containment of the expected data in the answer.
///
/// Both sides are rendered to text first, so numeric expected data works as well.
pub fn expected_data_match(expected_data: impl Display, actual_response: impl Display) -> bool {
    let expected = expected_data.to_string().to_lowercase();
    let actual = actual_response.to_string().to_lowercase();

    actual.contains(&expected)
}

/// Weighted average of the signals, booleans counting as 0 or 1.
///
/// The caller guarantees a positive weight sum (enforced at config load).
pub fn combined_score(
    similarity_score: f64,
    keyword_match: bool,
    fuzzy_match: bool,
    levenshtein_similarity: f64,
    weights: &MetricWeights,
) -> f64 {
    let weighted = similarity_score * weights.similarity
        + f64::from(u8::from(keyword_match)) * weights.keyword_match
        + f64::from(u8::from(fuzzy_match)) * weights.fuzzy_match
        + levenshtein_similarity * weights.levenshtein_similarity;

    weighted / weights.total()
}

impl SignalScores {
    /// Assemble the signal record, deriving the fuzzy match and combined score
    pub fn compute(
        similarity_score: f64,
        keyword_match: bool,
        fuzzy_score: u8,
        fuzzy_match_threshold: f64,
        levenshtein_similarity: f64,
        weights: &MetricWeights,
    ) -> Self {
        let fuzzy_match = f64::from(fuzzy_score) >= fuzzy_match_threshold;
        let combined_score = combined_score(
            similarity_score,
            keyword_match,
            fuzzy_match,
            levenshtein_similarity,
            weights,
        );

        Self {
            similarity_score,
            keyword_match,
            fuzzy_score,
            fuzzy_match,
            levenshtein_similarity,
            combined_score,
        }
    }
}
