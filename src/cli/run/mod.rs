//! Run command - asks every question and writes the report

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{error, info};

use crate::config::headless_from_env;
use crate::domain::agent::Credentials;
use crate::domain::session::{FailurePolicy, SessionDriver};
use crate::infrastructure::question::load_question_cases;
use crate::infrastructure::report::CsvReportSink;
use crate::infrastructure::services::BatchService;

/// Arguments for the run command
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Question file (overrides `questions.path`)
    #[arg(long)]
    pub questions: Option<PathBuf>,

    /// Report directory (overrides `report.output_dir`)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Record interaction and provider failures per question and keep going
    #[arg(long)]
    pub isolate_failures: bool,
}

/// Run the question batch
pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = super::bootstrap()?;

    let credentials = Credentials::from_env().inspect_err(|e| {
        error!(stage = e.stage(), "{}", e);
    })?;

    if let Some(path) = args.questions {
        config.questions.path = path;
    }
    if let Some(dir) = args.output {
        config.report.output_dir = dir;
    }
    if args.isolate_failures {
        config.failure_policy = FailurePolicy::Isolate;
    }
    config.validate().context("Invalid configuration")?;

    let cases = load_question_cases(&config.questions.path)?;
    let engine = crate::create_validation_engine(&config)?;
    let agent = crate::create_chat_agent(&config)?;

    let headless = headless_from_env();
    let settings = config.session.to_settings(config.failure_policy, !headless);
    info!(
        headless,
        failure_policy = ?config.failure_policy,
        questions = cases.len(),
        "Configuration ready"
    );

    let sink = CsvReportSink::new(&config.report.output_dir);
    let service = BatchService::new(&engine, &sink);
    let summary = service
        .run(SessionDriver::new(agent, settings), &credentials, &cases)
        .await?;

    println!("{}", summary);
    println!("Report written to {}", sink.output_dir().display());

    Ok(())
}
