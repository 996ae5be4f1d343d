//! Score command - scores a single answer

use clap::Args;

/// Arguments for the score command
#[derive(Args, Clone, Debug)]
pub struct ScoreArgs {
    /// Expected answer text
    #[arg(long)]
    pub expected: String,

    /// Answer to score
    #[arg(long)]
    pub actual: String,

    /// Fragment that must appear in the answer
    #[arg(long, default_value = "")]
    pub expected_data: String,
}

/// Score one pair and print the validation result as JSON
pub async fn run(args: ScoreArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let engine = crate::create_validation_engine(&config)?;

    let result = engine
        .validate(&args.expected, &args.actual, &args.expected_data)
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
