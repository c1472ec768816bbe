//! `marketlens ranking`: one-off leaderboard.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::RankingArgs;
use super::output;
use crate::domain::{AggregateEntry, RankingKind, Timeframe};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_analytics;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct RankingRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<AggregateEntry> for RankingRow {
    fn from(entry: AggregateEntry) -> Self {
        Self {
            rank: entry.rank,
            address: entry.address,
            value: entry.value,
        }
    }
}

/// Compute the leaderboard against the configured chain and print it.
pub async fn execute(args: &RankingArgs) -> Result<()> {
    let config = Config::load(&args.config.config)?;
    config.init_logging();

    let kind = RankingKind::from(args.kind);
    let timeframe = Timeframe::from_param(Some(args.timeframe.as_str()));
    let analytics = build_analytics(&config)?;
    let board = analytics.ranking(kind, timeframe).await?.value;

    if output::is_json() {
        output::json_output(json!({
            "command": "ranking",
            "kind": kind.as_str(),
            "timeframe": timeframe.as_str(),
            "complete": board.complete,
            "entries": board.entries,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Top {kind} ({})", timeframe.as_str()));
    if board.entries.is_empty() {
        output::warning("No entries in this timeframe");
    } else {
        let rows: Vec<RankingRow> = board.entries.into_iter().map(RankingRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
    output::field("History", if board.complete { "full" } else { "window" });

    Ok(())
}
