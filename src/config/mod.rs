mod app_config;

pub use app_config::{
    headless_from_env, parse_headless, AgentConfig, AppConfig, ConfigValidationError,
    EmbeddingConfig, LogFormat, LoggingConfig, QuestionsConfig, ReportConfig, SessionConfig,
    HEADLESS_VAR,
};
