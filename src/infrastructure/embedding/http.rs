//! Embedding provider speaking the OpenAI-compatible embeddings API

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::embedding::{Embedding, EmbeddingProvider};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Embedding provider backed by any `/v1/embeddings` compatible service
#[derive(Debug)]
pub struct HttpEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
    auth_header: Option<String>,
}

impl<C: HttpClientTrait> HttpEmbeddingProvider<C> {
    pub fn new(client: C, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            model: model.into(),
            auth_header: None,
        }
    }

    /// Send a bearer token with every request
    pub fn with_api_key(mut self, api_key: impl AsRef<str>) -> Self {
        self.auth_header = Some(format!("Bearer {}", api_key.as_ref()));
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Embedding, DomainError> {
        let response: EmbeddingsResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(
                self.provider_name(),
                format!("Failed to parse embedding response: {}", e),
            )
        })?;

        let vector = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::provider(self.provider_name(), "Response carried no embedding"))?;

        if vector.is_empty() {
            return Err(DomainError::provider(
                self.provider_name(),
                "Response carried an empty embedding",
            ));
        }

        Ok(Embedding::new(vector))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for HttpEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await
            .map_err(|e| match e {
                DomainError::Provider { message, .. } => {
                    DomainError::provider(self.provider_name(), message)
                }
                other => other,
            })?;

        let embedding = self.parse_response(response)?;
        debug!(model = %self.model, dimensions = embedding.dimensions(), "Embedded text");

        Ok(embedding)
    }

    fn provider_name(&self) -> &'static str {
        "embedding"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
