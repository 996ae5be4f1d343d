//! Chat agent talking to a JSON chat service over HTTP

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::agent::{ChatAgent, Credentials};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

/// Where the chat service lives
#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    pub base_url: String,
    pub login_path: String,
    pub chat_path: String,
}

impl ChatEndpoint {
    pub fn new(
        base_url: impl Into<String>,
        login_path: impl Into<String>,
        chat_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            login_path: login_path.into(),
            chat_path: chat_path.into(),
        }
    }

    fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }
}

type PendingReply = JoinHandle<Result<Vec<String>, DomainError>>;

/// Chat agent over HTTP.
///
/// The login reply's `token` is the post-login marker. Each question is sent
/// from a background task so the session driver can poll for the reply.
#[derive(Debug)]
pub struct HttpChatAgent<C: HttpClientTrait + 'static> {
    client: Arc<C>,
    endpoint: ChatEndpoint,
    token: Option<String>,
    pending: Option<PendingReply>,
    fragments: Option<Vec<String>>,
}

impl<C: HttpClientTrait + 'static> HttpChatAgent<C> {
    pub fn new(client: C, endpoint: ChatEndpoint) -> Self {
        Self {
            client: Arc::new(client),
            endpoint,
            token: None,
            pending: None,
            fragments: None,
        }
    }

    fn discard_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.fragments = None;
    }
}

#[async_trait]
impl<C: HttpClientTrait + 'static> ChatAgent for HttpChatAgent<C> {
    async fn submit_credentials(&mut self, credentials: &Credentials) -> Result<(), DomainError> {
        let body = serde_json::json!({
            "username": credentials.username(),
            "password": credentials.password(),
        });

        let response = self
            .client
            .post_json(&self.endpoint.login_url(), vec![("Content-Type", "application/json")], &body)
            .await
            .map_err(|e| DomainError::authentication(e.to_string()))?;

        let reply: LoginReply = serde_json::from_value(response)
            .map_err(|e| DomainError::authentication(format!("Malformed login reply: {}", e)))?;
        self.token = reply.token.filter(|t| !t.trim().is_empty());

        if self.token.is_none() {
            warn!("Login reply carried no session token");
        }
        Ok(())
    }

    async fn is_authenticated(&mut self) -> Result<bool, DomainError> {
        Ok(self.token.is_some())
    }

    async fn submit_question(&mut self, question: &str) -> Result<(), DomainError> {
        let token = self
            .token
            .clone()
            .ok_or_else(|| DomainError::interaction(question, "no authenticated session"))?;

        self.discard_pending();

        let client = Arc::clone(&self.client);
        let url = self.endpoint.chat_url();
        let question = question.to_string();

        self.pending = Some(tokio::spawn(async move {
            let auth = format!("Bearer {}", token);
            let body = serde_json::json!({ "message": question });
            let headers = vec![("Content-Type", "application/json"), ("Authorization", auth.as_str())];

            let response = client.post_json(&url, headers, &body).await?;
            Ok(ChatReply::parse(response)?.into_fragments())
        }));

        Ok(())
    }

    async fn has_response(&mut self) -> Result<bool, DomainError> {
        if self.fragments.is_some() {
            return Ok(true);
        }

        let finished = self.pending.as_ref().is_some_and(|h| h.is_finished());
        if !finished {
            return Ok(false);
        }

        let Some(handle) = self.pending.take() else {
            return Ok(false);
        };

        let fragments = handle
            .await
            .map_err(|e| DomainError::provider("chat", format!("reply task failed: {}", e)))??;

        debug!(fragments = fragments.len(), "Chat reply arrived");
        self.fragments = Some(fragments);
        Ok(true)
    }

    async fn response_fragments(&mut self) -> Result<Vec<String>, DomainError> {
        Ok(self.fragments.clone().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), DomainError> {
        self.discard_pending();
        self.token = None;
        Ok(())
    }

    fn agent_name(&self) -> &'static str {
        "http"
    }
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    fragments: Option<Vec<String>>,
    #[serde(default)]
    content: Option<String>,
}

impl ChatReply {
    fn parse(value: serde_json::Value) -> Result<Self, DomainError> {
        serde_json::from_value(value)
            .map_err(|e| DomainError::provider("chat", format!("Malformed chat reply: {}", e)))
    }

    fn into_fragments(self) -> Vec<String> {
        if let Some(fragments) = self.fragments {
            return fragments;
        }

        self.content
            .map(|content| {
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
