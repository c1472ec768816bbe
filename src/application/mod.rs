//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod analytics;
pub mod cache;

pub use analytics::{
    AnalyticsService, AnalyticsSettings, MarketActivity, MarketHolders, RankingBoard, Ttls,
};
pub use cache::{CacheOptions, CacheStatus, Cached, Clock, ProjectionCache, SystemClock};
