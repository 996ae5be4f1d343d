//! Chat agent trait definition

use async_trait::async_trait;

use super::Credentials;
use crate::domain::DomainError;

/// Primitive capabilities of a chat agent surface.
///
/// The session driver owns the agent exclusively and composes these calls into
/// `login` and `ask`, adding the readiness waits around them. Readiness probes
/// must return promptly; the driver does the waiting.
#[async_trait]
pub trait ChatAgent: Send {
    /// Submit the login form
    async fn submit_credentials(&mut self, credentials: &Credentials) -> Result<(), DomainError>;

    /// Whether the post-login marker is present
    async fn is_authenticated(&mut self) -> Result<bool, DomainError>;

    /// Type a question into the input surface and send it
    async fn submit_question(&mut self, question: &str) -> Result<(), DomainError>;

    /// Whether response content has started to appear for the last question
    async fn has_response(&mut self) -> Result<bool, DomainError>;

    /// Text fragments of the latest response, in document order
    async fn response_fragments(&mut self) -> Result<Vec<String>, DomainError>;

    /// Release the session
    async fn close(&mut self) -> Result<(), DomainError>;

    /// Get the agent name
    fn agent_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// What the scripted agent does after a question is submitted
    #[derive(Debug, Clone)]
    pub enum ScriptedReply {
        /// Response content is present on the first readiness probe
        Fragments(Vec<String>),
        /// Response content appears after the given number of probes
        Delayed { probes: usize, fragments: Vec<String> },
        /// No response content ever appears
        Silent,
    }

    /// Agent that replays a fixed script of replies
    #[derive(Debug)]
    pub struct ScriptedAgent {
        accept_login: bool,
        login_error: Option<String>,
        authenticated: bool,
        replies: VecDeque<ScriptedReply>,
        current: Option<ScriptedReply>,
        probes: usize,
        asked: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
    }

    impl ScriptedAgent {
        pub fn new() -> Self {
            Self {
                accept_login: true,
                login_error: None,
                authenticated: false,
                replies: VecDeque::new(),
                current: None,
                probes: 0,
                asked: Arc::new(Mutex::new(Vec::new())),
                closed: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Login submits fine but the post-login marker never appears
        pub fn rejecting_login(mut self) -> Self {
            self.accept_login = false;
            self
        }

        /// Login submission itself fails
        pub fn failing_login(mut self, error: impl Into<String>) -> Self {
            self.login_error = Some(error.into());
            self
        }

        pub fn with_reply(mut self, fragments: &[&str]) -> Self {
            self.replies.push_back(ScriptedReply::Fragments(
                fragments.iter().map(|f| f.to_string()).collect(),
            ));
            self
        }

        pub fn with_delayed_reply(mut self, probes: usize, fragments: &[&str]) -> Self {
            self.replies.push_back(ScriptedReply::Delayed {
                probes,
                fragments: fragments.iter().map(|f| f.to_string()).collect(),
            });
            self
        }

        pub fn with_silence(mut self) -> Self {
            self.replies.push_back(ScriptedReply::Silent);
            self
        }

        /// Handle to the questions submitted so far
        pub fn asked(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.asked)
        }

        /// Handle reporting whether the session was released
        pub fn closed(&self) -> Arc<AtomicBool> {
            Arc::clone(&self.closed)
        }
    }

    impl Default for ScriptedAgent {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ChatAgent for ScriptedAgent {
        async fn submit_credentials(&mut self, _credentials: &Credentials) -> Result<(), DomainError> {
            if let Some(ref error) = self.login_error {
                return Err(DomainError::authentication(error));
            }
            self.authenticated = self.accept_login;
            Ok(())
        }

        async fn is_authenticated(&mut self) -> Result<bool, DomainError> {
            Ok(self.authenticated)
        }

        async fn submit_question(&mut self, question: &str) -> Result<(), DomainError> {
            self.asked.lock().unwrap().push(question.to_string());
            self.current = Some(self.replies.pop_front().unwrap_or(ScriptedReply::Silent));
            self.probes = 0;
            Ok(())
        }

        async fn has_response(&mut self) -> Result<bool, DomainError> {
            self.probes += 1;
            Ok(match &self.current {
                Some(ScriptedReply::Fragments(_)) => true,
                Some(ScriptedReply::Delayed { probes, .. }) => self.probes > *probes,
                Some(ScriptedReply::Silent) | None => false,
            })
        }

        async fn response_fragments(&mut self) -> Result<Vec<String>, DomainError> {
            Ok(match &self.current {
                Some(ScriptedReply::Fragments(fragments))
                | Some(ScriptedReply::Delayed { fragments, .. }) => fragments.clone(),
                Some(ScriptedReply::Silent) | None => Vec::new(),
            })
        }

        async fn close(&mut self) -> Result<(), DomainError> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn agent_name(&self) -> &'static str {
            "scripted"
        }
    }
}
