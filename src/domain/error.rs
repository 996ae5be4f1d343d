use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Interaction failed for question '{question}': {message}")]
    Interaction { question: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Report I/O error: {message}")]
    ReportIo { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Precondition failed: {message}")]
    Precondition { message: String },
}

impl DomainError {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn interaction(question: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Interaction {
            question: question.into(),
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn report_io(message: impl Into<String>) -> Self {
        Self::ReportIo {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Whether this failure invalidates the whole batch.
    ///
    /// Interaction and provider failures are scoped to a single question and may be
    /// isolated; everything else ends the run.
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(self, Self::Interaction { .. } | Self::Provider { .. })
    }

    /// Short stage label used in logs and in failed result rows
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "login",
            Self::Interaction { .. } => "ask",
            Self::Provider { .. } => "scoring",
            Self::ReportIo { .. } => "report",
            Self::Configuration { .. } | Self::Validation { .. } | Self::Precondition { .. } => {
                "setup"
            }
        }
    }
}
