//! Shared handler state.

use std::sync::Arc;

use crate::application::AnalyticsService;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsService>,
}

impl AppState {
    #[must_use]
    pub fn new(analytics: Arc<AnalyticsService>) -> Self {
        Self { analytics }
    }
}
