//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Numeric market identifier as emitted by the market contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(u64);

impl MarketId {
    /// Create a new `MarketId`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MarketId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Account that performed a market action.
///
/// Wraps the 20-byte address, so two spellings that differ only in case
/// are the same actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Actor(Address);

impl Actor {
    /// Create a new `Actor` from an address.
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// Get the underlying address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }

    /// EIP-55 checksummed form, as the chain tooling prints it.
    #[must_use]
    pub fn checksummed(&self) -> String {
        self.0.to_checksum(None)
    }
}

/// Lowercase hex with `0x` prefix.
impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed().to_lowercase())
    }
}

impl From<Address> for Actor {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}

impl FromStr for Actor {
    type Err = alloy_primitives::hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_str(s).map(Self)
    }
}
