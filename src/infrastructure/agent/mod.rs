//! Chat agent implementations

mod http_agent;

pub use http_agent::{ChatEndpoint, HttpChatAgent};
