//! Static [`MarketDirectory`] for tests.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::port::{MarketDirectory, MarketQuery};

/// Serves market documents registered up front.
///
/// Unknown slugs fail the way the metadata API does, with an upstream 404.
/// `markets` returns every document whose `state` matches the query (all of
/// them when the query has no state).
#[derive(Debug, Default)]
pub struct StaticDirectory {
    documents: Vec<(String, Value)>,
    market_status: Option<u16>,
    listing_status: Option<u16>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open market with one outcome per title.
    pub fn with_market(self, slug: &str, id: u64, titles: &[&str]) -> Self {
        let outcomes: Vec<Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| json!({ "id": i, "title": title }))
            .collect();
        self.with_document(
            slug,
            json!({
                "id": id,
                "slug": slug,
                "title": format!("Market {id}"),
                "state": "open",
                "outcomes": outcomes,
            }),
        )
    }

    pub fn with_document(mut self, slug: &str, document: Value) -> Self {
        self.documents.push((slug.to_string(), document));
        self
    }

    /// Make every `market` lookup fail as if the upstream answered `status`.
    pub fn with_market_status(mut self, status: u16) -> Self {
        self.market_status = Some(status);
        self
    }

    /// Make `markets` fail as if the upstream answered `status`.
    pub fn with_listing_status(mut self, status: u16) -> Self {
        self.listing_status = Some(status);
        self
    }
}

#[async_trait]
impl MarketDirectory for StaticDirectory {
    async fn market(&self, slug: &str) -> Result<Value> {
        if let Some(status) = self.market_status {
            return Err(upstream(status));
        }
        self.documents
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, doc)| doc.clone())
            .ok_or_else(|| upstream(404))
    }

    async fn markets(&self, query: &MarketQuery) -> Result<Value> {
        if let Some(status) = self.listing_status {
            return Err(upstream(status));
        }
        let listed = self
            .documents
            .iter()
            .map(|(_, doc)| doc)
            .filter(|doc| match &query.state {
                Some(state) => doc["state"] == state.as_str(),
                None => true,
            })
            .cloned()
            .collect();
        Ok(Value::Array(listed))
    }
}

fn upstream(status: u16) -> Error {
    let message = match status {
        404 => "Not Found",
        503 => "Service Unavailable",
        _ => "upstream error",
    };
    Error::Upstream {
        status,
        message: message.into(),
    }
}
