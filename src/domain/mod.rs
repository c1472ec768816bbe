//! Chain-agnostic domain logic: action records, replay, and projections.

pub mod action;
pub mod amount;
pub mod id;
pub mod ledger;
pub mod market;
pub mod projection;
pub mod ranking;
pub mod window;

pub use action::{ActionKind, ActionRecord, LedgerPosition, Side};
pub use amount::Scale;
pub use id::{Actor, MarketId};
pub use ledger::{fold, Accumulate, ActivityLog, PositionBook, VolumeTally, WinningsTally};
pub use market::{MarketMetadata, Outcome};
pub use ranking::{build_ranking, AggregateEntry, RankingKind};
pub use window::{BlockWindow, Scan, Timeframe};
