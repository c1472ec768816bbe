//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as the event
//! log, the market metadata service, and cache storage.

pub mod cache;
pub mod metadata;
pub mod source;
