//! Myriad market metadata API integration.

pub mod client;
pub mod settings;

pub use client::MyriadClient;
pub use settings::MetadataConfig;
