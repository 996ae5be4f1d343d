//! Chat Regression Harness
//!
//! Drives a chat agent through a fixed list of questions and scores each answer
//! against an expected answer with four text-similarity signals:
//! - Embedding cosine similarity
//! - Keyword (lemma) overlap
//! - Fuzzy ratio
//! - Normalized Levenshtein similarity
//!
//! Per-question scores and batch classification metrics are written as CSV.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use domain::scoring::ValidationEngine;
use infrastructure::{
    agent::{ChatEndpoint, HttpChatAgent},
    embedding::HttpEmbeddingProvider,
    http::HttpClient,
    keywords::LexicalKeywordExtractor,
};

/// Build the validation engine with the configured signal providers
pub fn create_validation_engine(config: &AppConfig) -> anyhow::Result<ValidationEngine> {
    let timeout = Duration::from_secs(config.embedding.timeout_secs);
    let client = HttpClient::with_timeout(timeout).context("Failed to create embedding client")?;

    let mut embedder = HttpEmbeddingProvider::new(
        client,
        config.embedding.base_url.clone(),
        config.embedding.model.clone(),
    );
    if let Some(key) = config.embedding.api_key() {
        embedder = embedder.with_api_key(key);
    }

    let engine = ValidationEngine::new(
        Arc::new(embedder),
        Arc::new(LexicalKeywordExtractor::new()),
        config.scoring.clone(),
    )
    .context("Invalid scoring configuration")?
    .with_provider_timeout(timeout);

    Ok(engine)
}

/// Build the HTTP chat agent for the configured endpoint
pub fn create_chat_agent(config: &AppConfig) -> anyhow::Result<HttpChatAgent<HttpClient>> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.agent.request_timeout_secs))
        .context("Failed to create chat client")?;

    let endpoint = ChatEndpoint::new(
        config.agent.base_url.clone(),
        config.agent.login_path.clone(),
        config.agent.chat_path.clone(),
    );

    Ok(HttpChatAgent::new(client, endpoint))
}
