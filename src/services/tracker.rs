//! Log-and-default adapter over [`TrendingService`].
//!
//! Search analytics must never break the caller: failures are logged here
//! and turned into a no-op or an empty leaderboard.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::models::{Movie, SearchRecord};
use crate::services::trending_service::TrendingService;

#[derive(Clone)]
pub struct TrendingTracker {
    service: Arc<dyn TrendingService>,
}

impl TrendingTracker {
    #[must_use]
    pub fn new(service: Arc<dyn TrendingService>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn service(&self) -> &Arc<dyn TrendingService> {
        &self.service
    }

    /// Records a search. Never fails; errors are only logged.
    pub async fn record_search(&self, term: &str, movie: &Movie) {
        match self.service.record_search(term, movie).await {
            Ok(outcome) => {
                debug!(search_term = %term, count = outcome.count(), "Search recorded");
            }
            Err(e) => {
                error!(
                    search_term = %term,
                    kind = e.kind(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Failed to record search"
                );
            }
        }
    }

    /// Runs `record_search` in the background. The handle may be dropped.
    pub fn spawn_record_search(&self, term: String, movie: Movie) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            tracker.record_search(&term, &movie).await;
        })
    }

    /// Returns the leaderboard, or an empty list when the store fails.
    pub async fn fetch_trending(&self) -> Vec<SearchRecord> {
        match self.service.fetch_trending().await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    kind = e.kind(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Failed to fetch trending searches"
                );
                Vec::new()
            }
        }
    }
}
