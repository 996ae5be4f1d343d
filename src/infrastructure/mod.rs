//! Infrastructure layer - External service implementations

pub mod agent;
pub mod embedding;
pub mod http;
pub mod keywords;
pub mod logging;
pub mod question;
pub mod report;
pub mod services;
