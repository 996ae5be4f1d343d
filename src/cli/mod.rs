//! CLI module for the chat regression harness
//!
//! Provides subcommands:
//! - `run`: ask every question, score the answers and write the report
//! - `score`: score a single expected/actual pair
//! - `check`: validate configuration and the question file

pub mod check;
pub mod run;
pub mod score;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Chat Regression Harness - scores chat agent answers against expected answers
#[derive(Parser)]
#[command(name = "chat-harness")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full question batch against the chat agent
    Run(run::RunArgs),

    /// Score one answer against an expected answer and print the result as JSON
    Score(score::ScoreArgs),

    /// Load and validate configuration and questions without contacting the agent
    Check(check::CheckArgs),
}

/// Load `.env`, the layered configuration and start logging
fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    logging::init_logging(&config.logging);

    Ok(config)
}
