use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::scoring::{validate_scoring_config, ScoringConfig, ScoringConfigError};
use crate::domain::session::{FailurePolicy, SessionSettings};
use crate::infrastructure::embedding::DEFAULT_EMBEDDING_MODEL;

/// Environment variable selecting headless execution
pub const HEADLESS_VAR: &str = "HEADLESS_MODE";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub questions: QuestionsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Session timings, in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_login_timeout_ms")]
    pub login_timeout_ms: u64,
    #[serde(default = "default_quiescence_ms")]
    pub quiescence_ms: u64,
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_login_timeout_ms() -> u64 {
    5_000
}

fn default_quiescence_ms() -> u64 {
    15_000
}

fn default_response_timeout_ms() -> u64 {
    20_000
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_timeout_ms: default_login_timeout_ms(),
            quiescence_ms: default_quiescence_ms(),
            response_timeout_ms: default_response_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl SessionConfig {
    /// Build driver settings from these timings
    pub fn to_settings(&self, failure_policy: FailurePolicy, echo_exchanges: bool) -> SessionSettings {
        SessionSettings {
            login_timeout: Duration::from_millis(self.login_timeout_ms),
            quiescence: Duration::from_millis(self.quiescence_ms),
            response_timeout: Duration::from_millis(self.response_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            failure_policy,
            echo_exchanges,
        }
    }
}

/// Chat service endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    /// Upper bound for a single HTTP exchange with the chat service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_agent_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_login_path() -> String {
    "/api/login".to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: default_agent_base_url(),
            login_path: default_login_path(),
            chat_path: default_chat_path(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Embedding service endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Name of the environment variable holding the API key, if the service needs one
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_embedding_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_embedding_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            api_key_env: None,
            timeout_secs: default_embedding_timeout_secs(),
        }
    }
}

impl EmbeddingConfig {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsConfig {
    #[serde(default = "default_questions_path")]
    pub path: PathBuf,
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("questions.csv")
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            path: default_questions_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Configuration errors found after loading
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("scoring: {0}")]
    Scoring(#[from] ScoringConfigError),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("HARNESS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the run cannot work with
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_scoring_config(&self.scoring)?;

        let durations = [
            ("session.login_timeout_ms", self.session.login_timeout_ms),
            ("session.response_timeout_ms", self.session.response_timeout_ms),
            ("session.poll_interval_ms", self.session.poll_interval_ms),
            ("agent.request_timeout_secs", self.agent.request_timeout_secs),
            ("embedding.timeout_secs", self.embedding.timeout_secs),
        ];
        for (name, value) in durations {
            if value == 0 {
                return Err(ConfigValidationError::ZeroDuration(name));
            }
        }

        if self.agent.base_url.trim().is_empty() {
            return Err(ConfigValidationError::Empty("agent.base_url"));
        }
        if self.embedding.base_url.trim().is_empty() {
            return Err(ConfigValidationError::Empty("embedding.base_url"));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(ConfigValidationError::Empty("embedding.model"));
        }

        Ok(())
    }
}

/// Interpret a `HEADLESS_MODE` value; `true`, `1` and `yes` in any case mean headless
pub fn parse_headless(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

pub fn headless_from_env() -> bool {
    parse_headless(std::env::var(HEADLESS_VAR).ok().as_deref())
}
