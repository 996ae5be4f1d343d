//! Check command - validates configuration and the question file

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::config::headless_from_env;
use crate::domain::agent::{PASSWORD_VAR, USERNAME_VAR};
use crate::infrastructure::question::load_question_cases;

/// Arguments for the check command
#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Question file (overrides `questions.path`)
    #[arg(long)]
    pub questions: Option<PathBuf>,
}

/// Validate everything a run needs without starting a session
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let mut config = super::bootstrap()?;

    if let Some(path) = args.questions {
        config.questions.path = path;
    }
    config.validate().context("Invalid configuration")?;

    let cases = load_question_cases(&config.questions.path)?;

    let weights = &config.scoring.weights;
    println!("Questions:        {} ({})", cases.len(), config.questions.path.display());
    println!(
        "Thresholds:       keyword {} / fuzzy {}",
        config.scoring.keyword_match_threshold, config.scoring.fuzzy_match_threshold
    );
    println!(
        "Weights:          similarity {} / keyword {} / fuzzy {} / levenshtein {}",
        weights.similarity, weights.keyword_match, weights.fuzzy_match, weights.levenshtein_similarity
    );
    println!("Agent:            {}", config.agent.base_url);
    println!(
        "Embedding:        {} ({})",
        config.embedding.base_url, config.embedding.model
    );
    println!("Failure policy:   {:?}", config.failure_policy);
    println!("Headless:         {}", headless_from_env());
    println!("Report directory: {}", config.report.output_dir.display());

    for var in [USERNAME_VAR, PASSWORD_VAR] {
        let state = match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => "set",
            _ => "MISSING",
        };
        println!("{:<17} {}", format!("{}:", var), state);
    }

    Ok(())
}
