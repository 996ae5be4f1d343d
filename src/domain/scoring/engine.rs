//! Validation engine - turns an expected/actual pair into a signal record

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::signals::{expected_data_match, fuzzy_score, keyword_match, levenshtein_similarity};
use super::{validate_scoring_config, ScoringConfig, SignalScores, ValidationResult};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::keywords::KeywordExtractor;
use crate::domain::DomainError;

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Scores agent answers against expected answers.
///
/// Constructed once per run with its text signal providers and shared by
/// reference with the session driver. Provider failures are returned, never
/// replaced by a zero score.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    extractor: Arc<dyn KeywordExtractor>,
    config: ScoringConfig,
    provider_timeout: Duration,
}

impl ValidationEngine {
    /// Create a new engine, rejecting an invalid scoring configuration
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        extractor: Arc<dyn KeywordExtractor>,
        config: ScoringConfig,
    ) -> Result<Self, DomainError> {
        validate_scoring_config(&config)
            .map_err(|e| DomainError::configuration(e.to_string()))?;

        Ok(Self {
            embedder,
            extractor,
            config,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        })
    }

    /// Bound every provider call by the given duration
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the four signals and their weighted blend
    pub async fn score(&self, expected: &str, actual: &str) -> Result<SignalScores, DomainError> {
        let extractor = self.extractor.extractor_name();
        let actual_keywords = self
            .bounded(extractor, self.extractor.lemmas(actual))
            .await?;
        let expected_keywords = self
            .bounded(extractor, self.extractor.lemmas(expected))
            .await?;

        let embedder = self.embedder.provider_name();
        let expected_embedding = self.bounded(embedder, self.embedder.embed(expected)).await?;
        let actual_embedding = self.bounded(embedder, self.embedder.embed(actual)).await?;
        let similarity_score = expected_embedding.cosine_similarity(&actual_embedding);

        let keyword_match = keyword_match(
            &expected_keywords,
            &actual_keywords,
            self.config.keyword_match_threshold,
        );
        let fuzzy_score = fuzzy_score(expected, actual);
        let levenshtein_similarity = levenshtein_similarity(expected, actual);

        debug!(
            expected_keywords = expected_keywords.len(),
            overlap = expected_keywords.overlap(&actual_keywords),
            similarity_score,
            fuzzy_score,
            levenshtein_similarity,
            "Signals computed"
        );

        Ok(SignalScores::compute(
            similarity_score,
            keyword_match,
            fuzzy_score,
            self.config.fuzzy_match_threshold,
            levenshtein_similarity,
            &self.config.weights,
        ))
    }

    /// Score an answer and check it for the expected data fragment
    #[instrument(skip(self, expected_answer, actual, expected_data), fields(actual_len = actual.len()))]
    pub async fn validate(
        &self,
        expected_answer: &str,
        actual: &str,
        expected_data: &str,
    ) -> Result<ValidationResult, DomainError> {
        let scores = self.score(expected_answer, actual).await?;
        let data_match = expected_data_match(expected_data, actual);

        Ok(ValidationResult::new(actual, scores, data_match))
    }

    async fn bounded<T, F>(&self, provider: &str, call: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::provider(
                provider,
                format!("no reply within {}ms", self.provider_timeout.as_millis()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::{Embedding, MockEmbeddingProvider};
    use crate::domain::scoring::MetricWeights;
    use crate::infrastructure::keywords::LexicalKeywordExtractor;
    use async_trait::async_trait;

    fn engine(config: ScoringConfig) -> ValidationEngine {
        ValidationEngine::new(
            Arc::new(MockEmbeddingProvider::new(256)),
            Arc::new(LexicalKeywordExtractor::new()),
            config,
        )
        .unwrap()
    }

    #[derive(Debug)]
    struct StalledEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StalledEmbedder {
        async fn embed(&self, _text: &str) -> Result<Embedding, DomainError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Embedding::new(vec![1.0]))
        }

        fn provider_name(&self) -> &'static str {
            "stalled"
        }

        fn model(&self) -> &str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_identity_scores() {
        let engine = engine(ScoringConfig::default());
        let text = "Water boils at one hundred degrees Celsius at sea level";

        let scores = engine.score(text, text).await.unwrap();

        assert!((scores.similarity_score - 1.0).abs() < 1e-9);
        assert_eq!(scores.fuzzy_score, 100);
        assert!(scores.fuzzy_match);
        assert_eq!(scores.levenshtein_similarity, 1.0);
        assert!(scores.keyword_match);
        assert!((scores.combined_score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_reordered_answer_scenario() {
        let engine = engine(ScoringConfig::default());

        let result = engine
            .validate(
                "The capital of France is Paris",
                "Paris is the capital of France",
                "Paris",
            )
            .await
            .unwrap();

        assert!(result.similarity_score() > 0.8);
        assert!(result.fuzzy_score() >= 70);
        assert!(result.keyword_match());
        assert!(result.levenshtein_similarity() < 1.0);
        assert!(result.levenshtein_similarity() > 0.0);
        assert!(result.expected_data_match());
        assert_eq!(result.actual_answer(), "Paris is the capital of France");
    }

    #[tokio::test]
    async fn test_unrelated_answer_scores_low() {
        let engine = engine(ScoringConfig::default());

        let result = engine
            .validate(
                "The capital of France is Paris",
                "I cannot help with weather forecasts today",
                "Paris",
            )
            .await
            .unwrap();

        assert!(!result.keyword_match());
        assert!(!result.fuzzy_match());
        assert!(!result.expected_data_match());
        assert!(result.combined_score() < 0.5);
    }

    #[tokio::test]
    async fn test_combined_score_follows_weights() {
        let similarity_only = ScoringConfig::new().with_weights(MetricWeights::new(1.0, 0.0, 0.0, 0.0));
        let engine = engine(similarity_only);

        let scores = engine
            .score("The capital of France is Paris", "Paris is the capital of France")
            .await
            .unwrap();

        assert!((scores.combined_score - scores.similarity_score).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let engine = ValidationEngine::new(
            Arc::new(MockEmbeddingProvider::new(16).with_error("service unreachable")),
            Arc::new(LexicalKeywordExtractor::new()),
            ScoringConfig::default(),
        )
        .unwrap();

        let result = engine.validate("expected", "actual", "").await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_call_is_bounded() {
        let engine = ValidationEngine::new(
            Arc::new(StalledEmbedder),
            Arc::new(LexicalKeywordExtractor::new()),
            ScoringConfig::default(),
        )
        .unwrap()
        .with_provider_timeout(Duration::from_secs(5));

        let error = engine.score("a question", "an answer").await.unwrap_err();

        match error {
            DomainError::Provider { provider, message } => {
                assert_eq!(provider, "stalled");
                assert!(message.contains("5000ms"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = ValidationEngine::new(
            Arc::new(MockEmbeddingProvider::new(16)),
            Arc::new(LexicalKeywordExtractor::new()),
            ScoringConfig::new().with_weights(MetricWeights::new(0.0, 0.0, 0.0, 0.0)),
        );

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
