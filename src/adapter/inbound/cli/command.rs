//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::RankingKind;

/// Analytics API for on-chain prediction markets
#[derive(Parser, Debug)]
#[command(name = "marketlens")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),

    /// Compute a global leaderboard once and print it
    Ranking(RankingArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `marketlens check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Listen address, overrides `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args, Debug)]
pub struct RankingArgs {
    /// Leaderboard to compute.
    #[arg(value_enum)]
    pub kind: RankingArg,

    /// `month` for the last thirty days, anything else for full history.
    #[arg(long, default_value = "month")]
    pub timeframe: String,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RankingArg {
    Holders,
    Traders,
    Winners,
}

impl From<RankingArg> for RankingKind {
    fn from(arg: RankingArg) -> Self {
        match arg {
            RankingArg::Holders => Self::Holders,
            RankingArg::Traders => Self::Traders,
            RankingArg::Winners => Self::Winners,
        }
    }
}
