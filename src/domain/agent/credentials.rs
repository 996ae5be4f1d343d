//! Login credentials

use std::fmt;

use crate::domain::DomainError;

pub const USERNAME_VAR: &str = "CHATBOT_USERNAME";
pub const PASSWORD_VAR: &str = "CHATBOT_PASSWORD";

/// Username and password for the chat agent
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through a variable lookup; missing or blank values are a
    /// precondition failure
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        match (read(USERNAME_VAR), read(PASSWORD_VAR)) {
            (Some(username), Some(password)) => Ok(Self::new(username, password)),
            _ => Err(DomainError::precondition(format!(
                "{} and {} must be set in environment variables",
                USERNAME_VAR, PASSWORD_VAR
            ))),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
