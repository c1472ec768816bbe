//! Market metadata needed to filter and label action records.

use serde::{Deserialize, Serialize};

use super::id::MarketId;
use crate::error::{Error, Result};

/// A single outcome within a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

/// The parts of a market document the analytics care about.
///
/// The position of an outcome in `outcomes` is the `outcome_id` that the
/// contract emits for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketMetadata {
    pub id: MarketId,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    pub outcomes: Vec<Outcome>,
}

impl MarketMetadata {
    /// Extract metadata from a market document returned by the metadata API.
    ///
    /// Fields other than `id`, `slug`, `title` and `outcomes` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `id` or `outcomes` is missing or malformed.
    pub fn from_document(document: &serde_json::Value) -> Result<Self> {
        Self::deserialize(document)
            .map_err(|e| Error::Parse(format!("malformed market document: {e}")))
    }

    /// Title of the outcome at `index`, or a positional placeholder.
    #[must_use]
    pub fn outcome_title(&self, index: u64) -> String {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.outcomes.get(i))
            .map(|o| o.title.clone())
            .unwrap_or_else(|| format!("Outcome {index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_relevant_fields_and_ignores_the_rest() {
        let doc = json!({
            "id": 164,
            "slug": "will-it-rain",
            "title": "Will it rain?",
            "state": "open",
            "liquidity": 1200.5,
            "outcomes": [
                { "id": 0, "title": "Yes", "price": 0.61 },
                { "id": 1, "title": "No", "price": 0.39 }
            ]
        });

        let market = MarketMetadata::from_document(&doc).unwrap();

        assert_eq!(market.id, MarketId::new(164));
        assert_eq!(market.slug, "will-it-rain");
        assert_eq!(market.outcomes.len(), 2);
        assert_eq!(market.outcomes[1].title, "No");
    }

    #[test]
    fn missing_outcomes_is_a_parse_error() {
        let doc = json!({ "id": 1, "slug": "x" });
        assert!(matches!(
            MarketMetadata::from_document(&doc),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn outcome_title_falls_back_to_index() {
        let market = MarketMetadata {
            id: MarketId::new(1),
            slug: "m".into(),
            title: "M".into(),
            outcomes: vec![Outcome {
                id: 0,
                title: "Yes".into(),
            }],
        };

        assert_eq!(market.outcome_title(0), "Yes");
        assert_eq!(market.outcome_title(3), "Outcome 3");
    }
}
