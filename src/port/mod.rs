//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the chain, the metadata API, cache backends).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Chain  │            │  Metadata   │              │   Cache   │
//! │ Adapter │            │   Adapter   │              │   Store   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ActionSource`] - Append-only market action log
//! - [`MarketDirectory`] - Market metadata lookup
//! - [`CacheStore`] - Backing store for cached projections

pub mod outbound;

pub use outbound::cache::{CacheEntry, CacheStore};
pub use outbound::metadata::{MarketDirectory, MarketQuery};
pub use outbound::source::{ActionFilter, ActionSource};
