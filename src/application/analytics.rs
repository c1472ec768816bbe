//! Analytics use cases: per-market views, global leaderboards and the
//! metadata passthrough, each behind the projection cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::cache::{Cached, ProjectionCache};
use crate::domain::ledger::{fold, ActivityLog, PositionBook, VolumeTally, WinningsTally};
use crate::domain::projection::{
    activity_view, holders_view, Activity, OutcomeHolders, ACTIVITY_FEED_SIZE,
    HOLDERS_PER_OUTCOME,
};
use crate::domain::ranking::LEADERBOARD_SIZE;
use crate::domain::window::ACTIVITY_SPAN;
use crate::domain::{
    build_ranking, ActionKind, ActionRecord, AggregateEntry, BlockWindow, MarketId, RankingKind,
    Scale, Scan, Timeframe,
};
use crate::error::{Error, Result};
use crate::port::{ActionFilter, ActionSource, MarketDirectory, MarketQuery};

/// Recent trades of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketActivity {
    pub market_id: MarketId,
    pub activities: Vec<Activity>,
    /// Whether the scan covered the full history.
    pub complete: bool,
    pub cached_at: String,
}

/// Current holders of every outcome of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketHolders {
    pub market_id: MarketId,
    pub outcomes: Vec<OutcomeHolders>,
    pub complete: bool,
    pub cached_at: String,
}

/// A leaderboard and whether it was built from the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingBoard {
    pub entries: Vec<AggregateEntry>,
    pub complete: bool,
}

/// Freshness windows per projection family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttls {
    pub activity: Duration,
    pub holders: Duration,
    pub ranking: Duration,
    pub metadata: Duration,
}

impl Default for Ttls {
    fn default() -> Self {
        Self {
            activity: Duration::from_secs(300),
            holders: Duration::from_secs(300),
            ranking: Duration::from_secs(3600),
            metadata: Duration::from_secs(30),
        }
    }
}

/// Knobs for [`AnalyticsService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSettings {
    pub ttls: Ttls,
    pub window: BlockWindow,
    pub default_token: String,
    pub default_network_id: String,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            ttls: Ttls::default(),
            window: BlockWindow::default(),
            default_token: "USDT".into(),
            default_network_id: "11142220".into(),
        }
    }
}

/// Builds every read model the API serves.
///
/// Each call pulls what it needs from the event source, folds it and caches
/// the rendered result. Nothing is kept between calls besides the cache.
pub struct AnalyticsService {
    source: Arc<dyn ActionSource>,
    directory: Arc<dyn MarketDirectory>,
    cache: Arc<ProjectionCache>,
    settings: AnalyticsSettings,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(
        source: Arc<dyn ActionSource>,
        directory: Arc<dyn MarketDirectory>,
        cache: Arc<ProjectionCache>,
        settings: AnalyticsSettings,
    ) -> Self {
        Self {
            source,
            directory,
            cache,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Buy/Sell feed of the last day for `slug`, newest first.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown slug, or any source failure.
    #[instrument(skip(self))]
    pub async fn activity(&self, slug: &str) -> Result<Cached<MarketActivity>> {
        validate_slug(slug)?;
        let key = format!("activity:{slug}");
        self.cache
            .get_or_compute(&key, self.settings.ttls.activity, || async {
                let market = self.directory.resolve(slug).await?;
                let latest = self.source.latest_block().await?;
                let scan = Scan {
                    from_block: self.settings.window.start_of(latest, ACTIVITY_SPAN),
                    to_block: Some(latest),
                };

                let records = self
                    .pull(scan, Some(market.id), &[ActionKind::Buy, ActionKind::Sell])
                    .await?;
                let log = fold(&records, ActivityLog::default());
                let activities = activity_view(&market, &log, ACTIVITY_FEED_SIZE, Scale::Market);
                info!(market_id = %market.id, count = activities.len(), "Built activity feed");

                Ok(MarketActivity {
                    market_id: market.id,
                    activities,
                    complete: scan.is_complete(),
                    cached_at: self.cached_at(),
                })
            })
            .await
    }

    /// Top holders per outcome for `slug`, replayed from block 0.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown slug, or any source failure.
    #[instrument(skip(self))]
    pub async fn holders(&self, slug: &str) -> Result<Cached<MarketHolders>> {
        validate_slug(slug)?;
        let key = format!("holders:{slug}");
        self.cache
            .get_or_compute(&key, self.settings.ttls.holders, || async {
                let market = self.directory.resolve(slug).await?;
                let scan = Scan::full();

                let records = self
                    .pull(scan, Some(market.id), &[ActionKind::Buy, ActionKind::Sell])
                    .await?;
                let book = fold(&records, PositionBook::default());
                let outcomes = holders_view(&market, &book, HOLDERS_PER_OUTCOME, Scale::Market);
                info!(
                    market_id = %market.id,
                    positions = book.len(),
                    "Built holder lists"
                );

                Ok(MarketHolders {
                    market_id: market.id,
                    outcomes,
                    complete: scan.is_complete(),
                    cached_at: self.cached_at(),
                })
            })
            .await
    }

    /// Global leaderboard of `kind` over `timeframe`.
    ///
    /// # Errors
    ///
    /// Any source failure.
    #[instrument(skip(self))]
    pub async fn ranking(
        &self,
        kind: RankingKind,
        timeframe: Timeframe,
    ) -> Result<Cached<RankingBoard>> {
        let key = format!("ranking:{kind}:{}", timeframe.as_str());
        self.cache
            .get_or_compute(&key, self.settings.ttls.ranking, || async {
                let scan = self.scan_for(timeframe).await?;
                let records = self.pull(scan, None, kind.source_kinds()).await?;

                let entries = match kind {
                    RankingKind::Holders => {
                        let holdings = fold(&records, PositionBook::default()).holdings_by_actor();
                        build_ranking(kind, holdings.iter(), LEADERBOARD_SIZE, Scale::Internal)
                    }
                    RankingKind::Traders => {
                        let volume = fold(&records, VolumeTally::default());
                        build_ranking(kind, volume.totals().iter(), LEADERBOARD_SIZE, Scale::Internal)
                    }
                    RankingKind::Winners => {
                        let winnings = fold(&records, WinningsTally::default());
                        build_ranking(kind, winnings.totals().iter(), LEADERBOARD_SIZE, Scale::Internal)
                    }
                };
                info!(%kind, timeframe = timeframe.as_str(), count = entries.len(), "Built ranking");

                Ok(RankingBoard {
                    entries,
                    complete: scan.is_complete(),
                })
            })
            .await
    }

    /// Raw market document for `slug`.
    ///
    /// # Errors
    ///
    /// [`Error::Upstream`] when the metadata API rejects the lookup, or a
    /// transport failure.
    pub async fn market(&self, slug: &str) -> Result<Cached<Value>> {
        validate_slug(slug)?;
        let key = format!("market:{slug}");
        self.cache
            .get_or_compute(&key, self.settings.ttls.metadata, || self.directory.market(slug))
            .await
    }

    /// Raw market listing. Absent `token` and `network_id` fall back to the
    /// configured defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Upstream`] when the metadata API rejects the query, or a
    /// transport failure.
    pub async fn markets(
        &self,
        state: Option<String>,
        token: Option<String>,
        network_id: Option<String>,
    ) -> Result<Cached<Value>> {
        let query = MarketQuery {
            state: state.filter(|s| !s.is_empty()),
            token: token
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| self.settings.default_token.clone()),
            network_id: network_id
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| self.settings.default_network_id.clone()),
        };
        let key = format!("markets:{}", query.cache_segment());
        self.cache
            .get_or_compute(&key, self.settings.ttls.metadata, || async {
                self.directory.markets(&query).await
            })
            .await
    }

    async fn scan_for(&self, timeframe: Timeframe) -> Result<Scan> {
        let Some(span) = timeframe.span() else {
            return Ok(Scan::full());
        };
        let latest = self.source.latest_block().await?;
        Ok(Scan {
            from_block: self.settings.window.start_of(latest, span),
            to_block: None,
        })
    }

    async fn pull(
        &self,
        scan: Scan,
        market_id: Option<MarketId>,
        kinds: &[ActionKind],
    ) -> Result<Vec<ActionRecord>> {
        let mut filter = ActionFilter::range(scan.from_block, scan.to_block)
            .kinds(kinds.iter().copied());
        filter.market_id = market_id;

        let records = self.source.fetch_actions(&filter).await?;
        info!(
            source = self.source.source_name(),
            from_block = scan.from_block,
            count = records.len(),
            "Pulled action records"
        );
        Ok(records)
    }

    fn cached_at(&self) -> String {
        let now = i64::try_from(self.cache.now_ms()).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(now)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

fn validate_slug(slug: &str) -> Result<()> {
    if slug.trim().is_empty() {
        return Err(Error::InvalidInput("market slug is empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::cache::MemoryStore;
    use crate::application::cache::{CacheOptions, CacheStatus};
    use crate::testkit::clock::ManualClock;
    use crate::testkit::directory::StaticDirectory;
    use crate::testkit::domain::{actor, RecordBuilder};
    use crate::testkit::source::MemorySource;

    const E18: u64 = 1_000_000_000_000_000_000;

    struct Fixture {
        service: AnalyticsService,
        source: Arc<MemorySource>,
        clock: Arc<ManualClock>,
    }

    fn fixture(records: Vec<ActionRecord>, latest: u64) -> Fixture {
        let source = Arc::new(MemorySource::new(records).with_latest_block(latest));
        let directory =
            Arc::new(StaticDirectory::new().with_market("rain", 7, &["Yes", "No"]));
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = Arc::new(ProjectionCache::new(
            Arc::new(MemoryStore::new()),
            clock.clone(),
            CacheOptions::default(),
        ));
        let service = AnalyticsService::new(
            source.clone(),
            directory,
            cache,
            AnalyticsSettings::default(),
        );
        Fixture {
            service,
            source,
            clock,
        }
    }

    #[tokio::test]
    async fn holders_replay_full_history_of_the_market() {
        let records = vec![
            RecordBuilder::buy(actor(1), 7, 0).shares(100).at(1, 0).build(),
            RecordBuilder::sell(actor(1), 7, 0).shares(40).at(2, 0).build(),
            RecordBuilder::buy(actor(2), 8, 0).shares(5_000_000).at(3, 0).build(),
        ];
        let f = fixture(records, 10);

        let holders = f.service.holders("rain").await.unwrap();

        assert_eq!(holders.status, CacheStatus::Miss);
        assert!(holders.value.complete);
        assert_eq!(holders.value.market_id, MarketId::new(7));
        assert_eq!(holders.value.outcomes[0].holders[0].shares, "0.00");
        assert!(holders.value.outcomes[1].holders.is_empty());
        assert_eq!(holders.value.cached_at, "2023-11-14T22:13:20.000Z");
    }

    #[tokio::test]
    async fn activity_scans_the_last_day_only() {
        let window = BlockWindow::default().blocks_in(ACTIVITY_SPAN);
        let latest = window + 100;
        let records = vec![
            RecordBuilder::buy(actor(1), 7, 0).value(1_000_000).at(50, 0).build(),
            RecordBuilder::buy(actor(2), 7, 1).value(2_000_000).at(150, 0).build(),
        ];
        let f = fixture(records, latest);

        let feed = f.service.activity("rain").await.unwrap().value;

        assert!(!feed.complete);
        assert_eq!(feed.activities.len(), 1);
        assert_eq!(feed.activities[0].user, actor(2).checksummed());
        assert_eq!(feed.activities[0].outcome, "No");
        assert_eq!(feed.activities[0].shares, "2.00");
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found_and_not_cached() {
        let f = fixture(Vec::new(), 10);

        assert!(matches!(
            f.service.activity("missing").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            f.service.holders("missing").await,
            Err(Error::NotFound(_))
        ));
        assert_eq!(f.source.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn source_receives_pushed_down_filters() {
        let f = fixture(Vec::new(), 10);

        f.service.holders("rain").await.unwrap();
        f.service
            .ranking(RankingKind::Winners, Timeframe::AllTime)
            .await
            .unwrap();

        let filters = f.source.filters();
        assert_eq!(filters.len(), 2);
        assert_eq!(
            filters[0],
            ActionFilter::range(0, None)
                .market(MarketId::new(7))
                .kinds([ActionKind::Buy, ActionKind::Sell])
        );
        assert_eq!(
            filters[1],
            ActionFilter::range(0, None).kinds([ActionKind::ClaimWinnings])
        );
    }

    #[tokio::test]
    async fn empty_slug_is_invalid_input() {
        let f = fixture(Vec::new(), 10);
        assert!(matches!(
            f.service.activity(" ").await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn winners_ranking_counts_claims_only() {
        let records = vec![
            RecordBuilder::new(ActionKind::ClaimWinnings, actor(1), 7, 0)
                .value(5 * E18)
                .build(),
            RecordBuilder::buy(actor(2), 7, 0).value(9 * E18).build(),
        ];
        let f = fixture(records, 10);

        let board = f
            .service
            .ranking(RankingKind::Winners, Timeframe::AllTime)
            .await
            .unwrap()
            .value;

        assert!(board.complete);
        assert_eq!(
            board.entries,
            vec![AggregateEntry {
                address: actor(1).to_string(),
                value: "5.00".into(),
                rank: 1,
            }]
        );
    }

    #[tokio::test]
    async fn traders_ranking_sums_buy_and_sell_value() {
        let records = vec![
            RecordBuilder::buy(actor(1), 7, 0).value(2 * E18).build(),
            RecordBuilder::sell(actor(1), 7, 0).value(E18).build(),
            RecordBuilder::buy(actor(2), 9, 1).value(E18).build(),
        ];
        let f = fixture(records, 10);

        let board = f
            .service
            .ranking(RankingKind::Traders, Timeframe::AllTime)
            .await
            .unwrap()
            .value;

        let values: Vec<&str> = board.entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["3.00", "1.00"]);
    }

    #[tokio::test]
    async fn holders_ranking_sums_positive_balances_across_markets() {
        let records = vec![
            RecordBuilder::buy(actor(1), 7, 0).shares(2 * E18).build(),
            RecordBuilder::buy(actor(1), 9, 1).shares(E18).build(),
            RecordBuilder::sell(actor(1), 11, 0).shares(4 * E18).build(),
            RecordBuilder::sell(actor(2), 7, 0).shares(E18).build(),
        ];
        let f = fixture(records, 10);

        let board = f
            .service
            .ranking(RankingKind::Holders, Timeframe::AllTime)
            .await
            .unwrap()
            .value;

        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].value, "3.00");
    }

    #[tokio::test]
    async fn month_ranking_is_windowed() {
        let month = BlockWindow::default().blocks_in(crate::domain::window::MONTH_SPAN);
        let records = vec![
            RecordBuilder::buy(actor(1), 7, 0).value(E18).at(10, 0).build(),
            RecordBuilder::buy(actor(2), 7, 0).value(E18).at(month + 20, 0).build(),
        ];
        let f = fixture(records, month + 50);

        let board = f
            .service
            .ranking(RankingKind::Traders, Timeframe::Month)
            .await
            .unwrap()
            .value;

        assert!(!board.complete);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].address, actor(2).to_string());
    }

    #[tokio::test]
    async fn month_window_on_a_young_chain_is_complete() {
        let f = fixture(Vec::new(), 100);

        let board = f
            .service
            .ranking(RankingKind::Traders, Timeframe::Month)
            .await
            .unwrap()
            .value;

        assert!(board.complete);
        assert!(board.entries.is_empty());
    }

    #[tokio::test]
    async fn rankings_are_cached_per_kind_and_timeframe() {
        let f = fixture(Vec::new(), 10);

        f.service
            .ranking(RankingKind::Traders, Timeframe::AllTime)
            .await
            .unwrap();
        let hit = f
            .service
            .ranking(RankingKind::Traders, Timeframe::AllTime)
            .await
            .unwrap();
        let other = f
            .service
            .ranking(RankingKind::Winners, Timeframe::AllTime)
            .await
            .unwrap();

        assert_eq!(hit.status, CacheStatus::Hit);
        assert_eq!(other.status, CacheStatus::Miss);
        assert_eq!(f.source.fetch_calls(), 2);

        f.clock.advance(Duration::from_secs(3600));
        let expired = f
            .service
            .ranking(RankingKind::Traders, Timeframe::AllTime)
            .await
            .unwrap();
        assert_eq!(expired.status, CacheStatus::Miss);
    }

    #[tokio::test]
    async fn source_failure_propagates() {
        let f = fixture(Vec::new(), 10);
        f.source.fail_with("rpc down");

        assert!(matches!(
            f.service.ranking(RankingKind::Holders, Timeframe::AllTime).await,
            Err(Error::SourceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn markets_listing_fills_defaults() {
        let f = fixture(Vec::new(), 10);

        let listing = f.service.markets(None, None, None).await.unwrap();

        assert_eq!(listing.value[0]["slug"], "rain");
        assert_eq!(listing.status, CacheStatus::Miss);
        let again = f
            .service
            .markets(None, Some("USDT".into()), Some("11142220".into()))
            .await
            .unwrap();
        assert_eq!(again.status, CacheStatus::Hit);
    }
}
