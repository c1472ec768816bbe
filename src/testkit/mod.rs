//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - In-memory [`ActionSource`](crate::port::ActionSource) with
//!   call counting and failure injection.
//! - [`directory`] - Static [`MarketDirectory`](crate::port::MarketDirectory).
//! - [`clock`] - Manually advanced cache clock.
//! - [`domain`] - Builders for actors, markets and action records.
//! - [`config`] - Canonical test configurations.

pub mod clock;
pub mod config;
pub mod directory;
pub mod domain;
pub mod source;
