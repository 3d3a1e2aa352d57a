use derive_more::Deref;
use std::sync::Arc;

use super::{
    error::StoreError,
    record::{RangeQuery, Record, RecordKey},
};
use crate::PinFuture;

/// Shared handle on a store, cheap to clone across requests.
#[derive(Clone, Deref)]
#[deref(forward)]
pub struct StoreBox(Arc<dyn Store>);

impl StoreBox {
    pub fn new(store: impl Store + 'static) -> Self {
        Self(Arc::new(store))
    }
}

/// Single-table key-value store. Each call is atomic for its own key; there
/// are no multi-key transactions.
pub trait Store: Send + Sync {
    fn describe(&self) -> String;

    // Write a record, replacing any record at the same key
    fn put(&self, record: Record) -> PinFuture<'_, Result<(), StoreError>>;

    // Fetch by exact key, `StoreError::NotFound` when absent
    fn get<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<Record, StoreError>>;

    // All records of a partition matching the query, ordered by sort key
    fn query<'a>(&'a self, query: &'a RangeQuery)
        -> PinFuture<'a, Result<Vec<Record>, StoreError>>;

    // Remove by exact key; removing an absent key is not an error
    fn delete<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<(), StoreError>>;
}
