//! Marketlens - analytics over an on-chain prediction market's action log.
//!
//! Every buy, sell and claim is an event emitted by the market contract.
//! The crate replays those events into per-market and global projections
//! and serves them, cached, over HTTP.
//!
//! # Architecture
//!
//! - **`domain`** - Action records, the replay fold and the projections
//!   built from it (positions, activity, leaderboards)
//! - **`port`** - Traits for the event source, market metadata and cache store
//! - **`adapter::outbound`** - JSON-RPC log reader, Myriad REST client,
//!   in-memory cache store
//! - **`application`** - Projection cache and the analytics service
//! - **`adapter::inbound`** - HTTP API and CLI
//! - **`infrastructure`** - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use marketlens::infrastructure::bootstrap::build_analytics;
//! use marketlens::infrastructure::config::Config;
//!
//! # fn main() -> marketlens::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let analytics = build_analytics(&config)?;
//! # let _ = analytics;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
