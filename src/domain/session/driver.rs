//! Session driver - the login/ask/score state machine

use std::io::Write;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{error, info, instrument, warn};

use super::{FailurePolicy, QuestionResult, SessionOutcome, SessionState, WaitOutcome};
use crate::domain::agent::{ChatAgent, Credentials};
use crate::domain::question::QuestionCase;
use crate::domain::scoring::ValidationEngine;
use crate::domain::DomainError;

/// Text recorded when the agent answered without any content fragments
pub const NO_RESPONSE_SENTINEL: &str = "No response found";

/// Timings and policy for a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// How long to wait for the post-login marker
    pub login_timeout: Duration,
    /// Pause after submitting a question before polling for the response
    pub quiescence: Duration,
    /// How long to poll for the first response content
    pub response_timeout: Duration,
    pub poll_interval: Duration,
    pub failure_policy: FailurePolicy,
    /// Write each question/answer exchange to the echo writer as it happens
    pub echo_exchanges: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_timeout: Duration::from_millis(5_000),
            quiescence: Duration::from_millis(15_000),
            response_timeout: Duration::from_millis(20_000),
            poll_interval: Duration::from_millis(250),
            failure_policy: FailurePolicy::default(),
            echo_exchanges: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Probe {
    LoginMarker,
    ResponseContent,
}

/// Drives one chat session end to end.
///
/// The driver is the sole owner of the agent for the run and releases it on
/// every exit path of [`SessionDriver::run`].
pub struct SessionDriver<A: ChatAgent> {
    agent: A,
    state: SessionState,
    settings: SessionSettings,
    echo: Box<dyn Write + Send>,
}

impl<A: ChatAgent> SessionDriver<A> {
    pub fn new(agent: A, settings: SessionSettings) -> Self {
        Self {
            agent,
            state: SessionState::Idle,
            settings,
            echo: Box::new(std::io::stdout()),
        }
    }

    /// Send echoed exchanges somewhere other than stdout
    pub fn with_echo_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.echo = Box::new(writer);
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Ask every question in order, scoring each answer, then release the agent
    pub async fn run(
        mut self,
        credentials: &Credentials,
        cases: &[QuestionCase],
        engine: &ValidationEngine,
    ) -> Result<SessionOutcome, DomainError> {
        let outcome = self.drive(credentials, cases, engine).await;
        self.close().await;
        outcome
    }

    async fn drive(
        &mut self,
        credentials: &Credentials,
        cases: &[QuestionCase],
        engine: &ValidationEngine,
    ) -> Result<SessionOutcome, DomainError> {
        self.login(credentials).await?;

        let mut results = Vec::with_capacity(cases.len());

        for (index, case) in cases.iter().enumerate() {
            match self.step(index, case, engine).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!(
                        question = case.question(),
                        stage = e.stage(),
                        "Question failed: {}",
                        e
                    );

                    if self.settings.failure_policy == FailurePolicy::Isolate && !e.is_batch_fatal() {
                        results.push(QuestionResult::failed(case.clone(), &e));
                        self.state = SessionState::Authenticated;
                        continue;
                    }

                    return Ok(SessionOutcome::aborted(results, e));
                }
            }
        }

        Ok(SessionOutcome::completed(results))
    }

    #[instrument(skip(self, case, engine), fields(question = case.question()))]
    async fn step(
        &mut self,
        index: usize,
        case: &QuestionCase,
        engine: &ValidationEngine,
    ) -> Result<QuestionResult, DomainError> {
        let response = self.ask(case.question()).await?;

        if self.settings.echo_exchanges {
            let echoed = writeln!(
                self.echo,
                "[{}] Q: {}\n    A: {}",
                index + 1,
                case.question(),
                response
            )
            .and_then(|_| self.echo.flush());
            if let Err(e) = echoed {
                warn!("Failed to echo exchange: {}", e);
            }
        }

        let validation = engine
            .validate(case.expected_answer(), &response, case.expected_data())
            .await?;

        info!(
            combined_score = validation.combined_score(),
            keyword_match = validation.keyword_match(),
            fuzzy_match = validation.fuzzy_match(),
            expected_data_match = validation.expected_data_match(),
            "Question scored"
        );

        Ok(QuestionResult::scored(case.clone(), validation))
    }

    /// Submit credentials and wait for the post-login marker
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), DomainError> {
        if self.state != SessionState::Idle {
            return Err(DomainError::validation(format!(
                "cannot log in from state {}",
                self.state
            )));
        }

        info!(agent = self.agent.agent_name(), username = credentials.username(), "Logging in");

        if let Err(e) = self.agent.submit_credentials(credentials).await {
            error!("Error during login: {}", e);
            return Err(DomainError::authentication(e.to_string()));
        }

        let outcome = self
            .wait_for(Probe::LoginMarker, self.settings.login_timeout)
            .await
            .map_err(|e| DomainError::authentication(e.to_string()))?;

        if let WaitOutcome::TimedOut { waited } = outcome {
            error!("Login failed: marker not present after {}ms", waited.as_millis());
            return Err(DomainError::authentication(format!(
                "post-login marker not present after {}ms",
                waited.as_millis()
            )));
        }

        self.state = SessionState::Authenticated;
        info!("Login succeeded");
        Ok(())
    }

    /// Submit a question and collect the response text
    pub async fn ask(&mut self, question: &str) -> Result<String, DomainError> {
        if !self.state.can_ask() {
            return Err(DomainError::validation(format!(
                "cannot ask a question from state {}",
                self.state
            )));
        }

        self.state = SessionState::Asking;
        self.agent
            .submit_question(question)
            .await
            .map_err(|e| DomainError::interaction(question, e.to_string()))?;

        self.state = SessionState::AwaitingResponse;
        sleep(self.settings.quiescence).await;

        let outcome = self
            .wait_for(Probe::ResponseContent, self.settings.response_timeout)
            .await
            .map_err(|e| DomainError::interaction(question, e.to_string()))?;

        if let WaitOutcome::TimedOut { waited } = outcome {
            return Err(DomainError::interaction(
                question,
                format!("no response content within {}ms", waited.as_millis()),
            ));
        }

        let fragments = self
            .agent
            .response_fragments()
            .await
            .map_err(|e| DomainError::interaction(question, e.to_string()))?;

        self.state = SessionState::Scraped;

        let response = if fragments.is_empty() {
            NO_RESPONSE_SENTINEL.to_string()
        } else {
            fragments.join("\n")
        };

        info!(question, response = response.as_str(), "Response received");
        Ok(response)
    }

    async fn wait_for(&mut self, probe: Probe, timeout: Duration) -> Result<WaitOutcome, DomainError> {
        let started = Instant::now();
        let deadline = started + timeout;

        loop {
            let ready = match probe {
                Probe::LoginMarker => self.agent.is_authenticated().await?,
                Probe::ResponseContent => self.agent.has_response().await?,
            };
            if ready {
                return Ok(WaitOutcome::Ready);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(WaitOutcome::TimedOut {
                    waited: now - started,
                });
            }

            sleep(self.settings.poll_interval.min(deadline - now)).await;
        }
    }

    async fn close(&mut self) {
        if self.state.is_closed() {
            return;
        }

        if let Err(e) = self.agent.close().await {
            warn!("Failed to release agent session: {}", e);
        }
        self.state = SessionState::Closed;
        info!("Session closed");
    }
}
