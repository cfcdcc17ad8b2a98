//! Domain service for search popularity counters.
//!
//! Records search occurrences as find-or-create-then-increment against the
//! record store and serves the highest-count terms.

use crate::models::{Movie, SearchRecord};
use crate::store::StoreError;
use thiserror::Error;

/// What a successful `record_search` did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Created { id: String },
    Incremented { id: String, count: i64 },
}

impl RecordOutcome {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Incremented { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn count(&self) -> i64 {
        match self {
            Self::Created { .. } => 1,
            Self::Incremented { count, .. } => *count,
        }
    }
}

/// Errors specific to trending operations.
#[derive(Debug, Error)]
pub enum TrendingError {
    #[error("Search term must not be empty")]
    InvalidTerm,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrendingError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidTerm => "invalid_term",
            Self::Store(e) => e.kind(),
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidTerm => false,
            Self::Store(e) => e.is_retryable(),
        }
    }
}

/// Domain service trait for trending searches.
#[async_trait::async_trait]
pub trait TrendingService: Send + Sync {
    /// Counts one occurrence of `term`, creating its record on first sight.
    ///
    /// Not atomic: concurrent calls for the same term can create duplicate
    /// records or lose an increment.
    async fn record_search(
        &self,
        term: &str,
        movie: &Movie,
    ) -> Result<RecordOutcome, TrendingError>;

    /// Returns the most searched terms, highest count first.
    async fn fetch_trending(&self) -> Result<Vec<SearchRecord>, TrendingError>;
}
