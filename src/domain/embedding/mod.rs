//! Embedding provider domain - text to vector service consumed by the scoring engine

mod provider;
mod vector;

pub use provider::EmbeddingProvider;
pub use vector::{cosine_similarity, Embedding};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
