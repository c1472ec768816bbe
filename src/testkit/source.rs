//! In-memory [`ActionSource`] for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::action::sort_ledger_order;
use crate::domain::ActionRecord;
use crate::error::{Error, Result};
use crate::port::{ActionFilter, ActionSource};

/// Serves a fixed record list, honouring every [`ActionFilter`] predicate.
///
/// `latest_block` defaults to the highest record block.
pub struct MemorySource {
    records: Vec<ActionRecord>,
    latest_block: Option<u64>,
    failure: Mutex<Option<String>>,
    fetch_calls: AtomicUsize,
    filters: Mutex<Vec<ActionFilter>>,
}

impl MemorySource {
    pub fn new(mut records: Vec<ActionRecord>) -> Self {
        sort_ledger_order(&mut records);
        Self {
            records,
            latest_block: None,
            failure: Mutex::new(None),
            fetch_calls: AtomicUsize::new(0),
            filters: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latest_block(mut self, latest: u64) -> Self {
        self.latest_block = Some(latest);
        self
    }

    /// Make every later call fail with [`Error::SourceUnavailable`].
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock() = Some(reason.to_string());
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Number of `fetch_actions` calls so far, failed ones included.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Filters received so far, in call order.
    pub fn filters(&self) -> Vec<ActionFilter> {
        self.filters.lock().clone()
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().as_ref() {
            Some(reason) => Err(Error::SourceUnavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ActionSource for MemorySource {
    async fn latest_block(&self) -> Result<u64> {
        self.check()?;
        Ok(self.latest_block.unwrap_or_else(|| {
            self.records
                .iter()
                .map(|r| r.position.block_number)
                .max()
                .unwrap_or(0)
        }))
    }

    async fn fetch_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().push(filter.clone());
        self.check()?;
        Ok(self
            .records
            .iter()
            .filter(|r| filter.contains_block(r.position.block_number) && filter.matches(r))
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}
