//! Agent interface domain - the chat surface a regression session drives

mod credentials;
mod interface;

pub use credentials::{Credentials, PASSWORD_VAR, USERNAME_VAR};
pub use interface::ChatAgent;

#[cfg(test)]
pub use interface::mock::{ScriptedAgent, ScriptedReply};
