//! EVM chain integration: the prediction market contract's event log.

pub mod event;
pub mod settings;
pub mod source;

pub use settings::ChainConfig;
pub use source::ChainActionSource;
