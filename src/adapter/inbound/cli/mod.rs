//! CLI module graph.

pub mod check;
pub mod command;
pub mod output;
pub mod ranking;
pub mod serve;

use command::{CheckCommand, Cli, Commands};
use output::OutputConfig;

use crate::error::Result;

/// Apply global flags and dispatch to the selected subcommand.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Serve(args) => serve::execute(&args).await,
        Commands::Ranking(args) => ranking::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::execute_config(&arg.config),
    }
}
