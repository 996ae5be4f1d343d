//! HTTP transport shared by the agent and the embedding provider

mod http_client;

pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
