//! Block ranges to scan, derived from wall-clock spans.

use std::time::Duration;

/// Span of the recent-activity feed.
pub const ACTIVITY_SPAN: Duration = Duration::from_secs(24 * 60 * 60);

/// Span of the `month` leaderboard timeframe.
pub const MONTH_SPAN: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Leaderboard timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    /// The last thirty days.
    #[default]
    Month,
    /// Full history from block 0.
    AllTime,
}

impl Timeframe {
    /// Interpret the `timeframe` query parameter.
    ///
    /// Only `month` is recognized; an absent parameter also means `month`,
    /// anything else scans the full history.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("month") => Self::Month,
            Some(_) => Self::AllTime,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::AllTime => "all",
        }
    }

    /// Wall-clock span to look back, `None` for full history.
    #[must_use]
    pub const fn span(self) -> Option<Duration> {
        match self {
            Self::Month => Some(MONTH_SPAN),
            Self::AllTime => None,
        }
    }
}

/// Converts wall-clock spans into block counts using an average block interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    block_time_secs: u64,
}

impl BlockWindow {
    /// Create a window calculator. A zero interval is treated as one second.
    #[must_use]
    pub const fn new(block_time_secs: u64) -> Self {
        Self {
            block_time_secs: if block_time_secs == 0 { 1 } else { block_time_secs },
        }
    }

    /// Number of blocks produced over `span`.
    #[must_use]
    pub const fn blocks_in(&self, span: Duration) -> u64 {
        span.as_secs() / self.block_time_secs
    }

    /// First block of a window of `span` ending at `latest`, floored at 0.
    #[must_use]
    pub const fn start_of(&self, latest: u64, span: Duration) -> u64 {
        latest.saturating_sub(self.blocks_in(span))
    }
}

impl Default for BlockWindow {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Block range a projection was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub from_block: u64,
    /// `None` means the chain head at query time.
    pub to_block: Option<u64>,
}

impl Scan {
    /// Scan of the full history.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            from_block: 0,
            to_block: None,
        }
    }

    /// Whether the scan started at the first block, so balances are exact.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.from_block == 0
    }
}
