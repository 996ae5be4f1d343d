//! Embedding provider implementations

mod http;

pub use http::{HttpEmbeddingProvider, DEFAULT_EMBEDDING_MODEL};
