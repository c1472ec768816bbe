//! Market metadata lookup port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::MarketMetadata;
use crate::error::{Error, Result};

/// Query parameters forwarded to the market listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub state: Option<String>,
    pub token: String,
    pub network_id: String,
}

impl MarketQuery {
    /// Cache key segment for this query. Absent state renders as `all`.
    #[must_use]
    pub fn cache_segment(&self) -> String {
        format!(
            "{}:{}:{}",
            self.state.as_deref().unwrap_or("all"),
            self.token,
            self.network_id
        )
    }
}

/// Directory of markets keyed by slug.
#[async_trait]
pub trait MarketDirectory: Send + Sync {
    /// Raw market document for `slug`.
    ///
    /// A rejected lookup is reported as [`Error::Upstream`] carrying the
    /// upstream status.
    async fn market(&self, slug: &str) -> Result<Value>;

    /// Raw market listing for `query`.
    async fn markets(&self, query: &MarketQuery) -> Result<Value>;

    /// Market metadata for `slug`, parsed from [`market`](Self::market).
    ///
    /// Any upstream rejection becomes [`Error::NotFound`].
    async fn resolve(&self, slug: &str) -> Result<MarketMetadata> {
        let document = self.market(slug).await.map_err(|err| match err {
            Error::Upstream { .. } => Error::NotFound(slug.to_string()),
            other => other,
        })?;
        MarketMetadata::from_document(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_segment_defaults_state() {
        let query = MarketQuery {
            state: None,
            token: "USDT".into(),
            network_id: "11142220".into(),
        };
        assert_eq!(query.cache_segment(), "all:USDT:11142220");

        let open = MarketQuery {
            state: Some("open".into()),
            ..query
        };
        assert_eq!(open.cache_segment(), "open:USDT:11142220");
    }
}
