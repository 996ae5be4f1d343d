use chat_regression_harness::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => cli::run::run(args).await,
        Command::Score(args) => cli::score::run(args).await,
        Command::Check(args) => cli::check::run(args).await,
    }
}
