//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::Embedding;
use crate::domain::DomainError;

/// Trait for text embedding services
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the model the provider embeds with
    fn model(&self) -> &str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use unicode_segmentation::UnicodeSegmentation;

    /// Bag-of-words embedder: texts with the same lower-cased words map to the same
    /// vector regardless of word order.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock-embedding", error));
            }

            let mut vector = vec![0.0f32; self.dimensions];
            for word in text.unicode_words() {
                let hash = word
                    .to_lowercase()
                    .bytes()
                    .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
                vector[(hash % self.dimensions as u64) as usize] += 1.0;
            }

            Ok(Embedding::new(vector))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-embedding"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_reordered_text_embeds_identically() {
            let provider = MockEmbeddingProvider::new(64);

            let a = provider.embed("The capital of France is Paris").await.unwrap();
            let b = provider.embed("Paris is the capital of France").await.unwrap();

            assert_eq!(a, b);
            assert_eq!(a.dimensions(), 64);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new(8).with_error("API error");

            assert!(provider.embed("Hello").await.is_err());
        }
    }
}
