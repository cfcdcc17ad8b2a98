use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Query, SearchRecordStore, StoreError};
use crate::models::{NewSearchRecord, SearchRecord, SearchRecordPatch};

/// Process-local store with the same listing semantics as the remote one.
///
/// Records are kept in creation order, so equal sort keys keep that order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<SearchRecord>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_records(records: Vec<SearchRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Snapshot of every stored record, in creation order.
    pub async fn all(&self) -> Vec<SearchRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn attribute_value(record: &SearchRecord, attribute: &str) -> Result<Value, StoreError> {
    let value = match attribute {
        "$id" => Value::from(record.id.clone()),
        "searchTerm" => Value::from(record.search_term.clone()),
        "count" => Value::from(record.count),
        "movie_id" => Value::from(record.movie_id),
        "poster_url" => Value::from(record.poster_url.clone()),
        "$createdAt" => record
            .created_at
            .map_or(Value::Null, |t| Value::from(t.to_rfc3339())),
        other => {
            return Err(StoreError::Api {
                status: 400,
                message: format!("Attribute not found in schema: {other}"),
            });
        }
    };

    Ok(value)
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn matches(record: &SearchRecord, queries: &[Query]) -> Result<bool, StoreError> {
    for query in queries {
        if let Query::Equal { attribute, values } = query {
            let actual = attribute_value(record, attribute)?;
            if !values.iter().any(|v| *v == actual) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn sort_records(records: &mut [SearchRecord], queries: &[Query]) -> Result<(), StoreError> {
    let orders: Vec<&str> = queries
        .iter()
        .filter_map(|q| match q {
            Query::OrderDesc { attribute } => Some(attribute.as_str()),
            _ => None,
        })
        .collect();

    if orders.is_empty() {
        return Ok(());
    }

    // Reject unknown attributes before sorting so the comparator cannot fail.
    if let Some(first) = records.first() {
        for attribute in &orders {
            attribute_value(first, attribute)?;
        }
    }

    records.sort_by(|a, b| {
        for attribute in &orders {
            let left = attribute_value(a, attribute).unwrap_or(Value::Null);
            let right = attribute_value(b, attribute).unwrap_or(Value::Null);
            let ordering = compare_values(&right, &left);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    Ok(())
}

#[async_trait]
impl SearchRecordStore for InMemoryStore {
    async fn list(&self, queries: &[Query]) -> Result<Vec<SearchRecord>, StoreError> {
        let records = self.records.read().await;

        let mut selected = Vec::new();
        for record in records.iter() {
            if matches(record, queries)? {
                selected.push(record.clone());
            }
        }
        drop(records);

        sort_records(&mut selected, queries)?;
        selected.truncate(Query::effective_limit(queries));

        debug!(returned = selected.len(), "Listed in-memory records");
        Ok(selected)
    }

    async fn update(
        &self,
        id: &str,
        patch: &SearchRecordPatch,
    ) -> Result<SearchRecord, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(count) = patch.count {
            record.count = count;
        }

        Ok(record.clone())
    }

    async fn create(&self, record: &NewSearchRecord) -> Result<SearchRecord, StoreError> {
        let created = SearchRecord {
            id: Uuid::new_v4().simple().to_string(),
            search_term: record.search_term.clone(),
            count: record.count,
            movie_id: record.movie_id,
            poster_url: record.poster_url.clone(),
            created_at: Some(Utc::now()),
        };

        self.records.write().await.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, term: &str, count: i64) -> SearchRecord {
        SearchRecord {
            id: id.to_string(),
            search_term: term.to_string(),
            count,
            movie_id: 1,
            poster_url: String::new(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn equal_filter_selects_exact_term() {
        let store = InMemoryStore::with_records(vec![
            record("a", "dune", 1),
            record("b", "Dune", 2),
            record("c", "dune part two", 3),
        ]);

        let found = store
            .list(&[Query::equal("searchTerm", "dune")])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[tokio::test]
    async fn order_desc_keeps_creation_order_for_ties() {
        let store = InMemoryStore::with_records(vec![
            record("first", "a", 2),
            record("top", "b", 5),
            record("second", "c", 2),
        ]);

        let found = store.list(&[Query::order_desc("count")]).await.unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["top", "first", "second"]);
    }

    #[tokio::test]
    async fn unknown_attribute_is_rejected() {
        let store = InMemoryStore::with_records(vec![record("a", "dune", 1)]);

        let err = store
            .list(&[Query::equal("title", "dune")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn update_of_missing_document_fails() {
        let store = InMemoryStore::new();

        let err = store
            .update("missing", &SearchRecordPatch::count(2))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let store = InMemoryStore::new();
        let created = store
            .create(&NewSearchRecord {
                search_term: "alien".to_string(),
                count: 1,
                movie_id: 348,
                poster_url: "https://image.tmdb.org/t/p/w500".to_string(),
            })
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert!(created.created_at.is_some());
        assert_eq!(store.len().await, 1);
    }
}
