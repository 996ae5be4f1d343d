//! Session states and wait outcomes

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// State of a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Authenticated,
    Asking,
    AwaitingResponse,
    Scraped,
    Closed,
}

impl SessionState {
    /// Whether a new question may be submitted from this state
    pub fn can_ask(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Scraped)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Authenticated => "authenticated",
            Self::Asking => "asking",
            Self::AwaitingResponse => "awaiting_response",
            Self::Scraped => "scraped",
            Self::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a bounded readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    TimedOut { waited: Duration },
}

impl WaitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// What to do when a single question fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Any failure ends the run
    #[default]
    Abort,
    /// Interaction and provider failures are recorded against the question and the
    /// queue continues; batch-fatal failures still end the run
    Isolate,
}
