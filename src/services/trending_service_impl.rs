//! Store-backed implementation of the `TrendingService` trait.

use crate::constants::trending::{COUNT_ATTRIBUTE, SEARCH_TERM_ATTRIBUTE};
use crate::models::{Movie, NewSearchRecord, SearchRecord, SearchRecordPatch};
use crate::services::trending_service::{RecordOutcome, TrendingError, TrendingService};
use crate::store::{Query, SearchRecordStore, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

pub struct DefaultTrendingService {
    store: Arc<dyn SearchRecordStore>,
    limit: usize,
    image_base_url: String,
}

impl DefaultTrendingService {
    #[must_use]
    pub fn new(store: Arc<dyn SearchRecordStore>, limit: usize, image_base_url: String) -> Self {
        Self {
            store,
            limit,
            image_base_url,
        }
    }

    async fn find_or_create(
        &self,
        term: &str,
        movie: &Movie,
    ) -> Result<RecordOutcome, TrendingError> {
        let existing = self
            .store
            .list(&[Query::equal(SEARCH_TERM_ATTRIBUTE, term)])
            .await?;

        if let Some(record) = existing.into_iter().next() {
            let count = record.count.checked_add(1).ok_or_else(|| {
                StoreError::MalformedResponse(format!(
                    "count of document {} cannot be incremented: {}",
                    record.id, record.count
                ))
            })?;
            debug!(search_term = %term, document_id = %record.id, count, "Incrementing search count");

            self.store
                .update(&record.id, &SearchRecordPatch::count(count))
                .await?;

            return Ok(RecordOutcome::Incremented {
                id: record.id,
                count,
            });
        }

        let new_record = NewSearchRecord::first_occurrence(term, movie, &self.image_base_url);
        let created = self.store.create(&new_record).await?;

        info!(search_term = %term, movie_id = movie.id, "Started tracking search term");

        Ok(RecordOutcome::Created { id: created.id })
    }
}

#[async_trait]
impl TrendingService for DefaultTrendingService {
    async fn record_search(
        &self,
        term: &str,
        movie: &Movie,
    ) -> Result<RecordOutcome, TrendingError> {
        if term.trim().is_empty() {
            metrics::counter!("trending_searches_recorded_total", "outcome" => "rejected")
                .increment(1);
            return Err(TrendingError::InvalidTerm);
        }

        let result = self.find_or_create(term, movie).await;

        let outcome = match &result {
            Ok(RecordOutcome::Created { .. }) => "created",
            Ok(RecordOutcome::Incremented { .. }) => "incremented",
            Err(_) => "failed",
        };
        metrics::counter!("trending_searches_recorded_total", "outcome" => outcome).increment(1);

        result
    }

    async fn fetch_trending(&self) -> Result<Vec<SearchRecord>, TrendingError> {
        let result = self
            .store
            .list(&[Query::order_desc(COUNT_ATTRIBUTE), Query::limit(self.limit)])
            .await;

        let outcome = if result.is_ok() { "success" } else { "failed" };
        metrics::counter!("trending_fetch_total", "outcome" => outcome).increment(1);

        let mut records = result?;
        // Backends are not trusted to apply the limit.
        records.truncate(self.limit);
        Ok(records)
    }
}
