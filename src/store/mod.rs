//! Persistence port for trending search records.
//!
//! The core only needs three remote operations: a filtered/sorted listing,
//! a partial update by document id and a create. Both the Appwrite client
//! and the in-memory store implement [`SearchRecordStore`].

pub mod error;
pub mod memory;
pub mod query;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use query::Query;

use crate::models::{NewSearchRecord, SearchRecord, SearchRecordPatch};
use async_trait::async_trait;

#[async_trait]
pub trait SearchRecordStore: Send + Sync {
    /// Lists documents matching every query, in the order the queries ask for.
    async fn list(&self, queries: &[Query]) -> Result<Vec<SearchRecord>, StoreError>;

    /// Applies a partial update to the document with the given id.
    async fn update(
        &self,
        id: &str,
        patch: &SearchRecordPatch,
    ) -> Result<SearchRecord, StoreError>;

    /// Creates a new document with a store-assigned id.
    async fn create(&self, record: &NewSearchRecord) -> Result<SearchRecord, StoreError>;
}
