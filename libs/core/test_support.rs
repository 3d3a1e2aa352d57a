use kitchen_storage::{
    storage::in_memory::InMemoryStore, PinFuture, RangeQuery, Record, RecordKey, Store,
    StoreBox, StoreError,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// In-memory store recording how many calls reached it.
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: Arc<InMemoryStore>,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_box(self) -> StoreBox {
        StoreBox::new(self)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Store for CountingStore {
    fn describe(&self) -> String {
        format!("counting {}", self.inner.describe())
    }

    fn put(&self, record: Record) -> PinFuture<'_, Result<(), StoreError>> {
        self.hit();
        self.inner.put(record)
    }

    fn get<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<Record, StoreError>> {
        self.hit();
        self.inner.get(key)
    }

    fn query<'a>(
        &'a self,
        query: &'a RangeQuery,
    ) -> PinFuture<'a, Result<Vec<Record>, StoreError>> {
        self.hit();
        self.inner.query(query)
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<(), StoreError>> {
        self.hit();
        self.inner.delete(key)
    }
}

/// Store whose every call fails like an unreachable backend.
pub struct FailingStore;

impl FailingStore {
    pub fn into_box(self) -> StoreBox {
        StoreBox::new(self)
    }
}

fn unreachable_backend<T: Send + 'static>() -> PinFuture<'static, Result<T, StoreError>> {
    Box::pin(async { Err(StoreError::Backend(eyre::eyre!("connection refused"))) })
}

impl Store for FailingStore {
    fn describe(&self) -> String {
        "failing storage".to_owned()
    }

    fn put(&self, _record: Record) -> PinFuture<'_, Result<(), StoreError>> {
        unreachable_backend()
    }

    fn get<'a>(&'a self, _key: &'a RecordKey) -> PinFuture<'a, Result<Record, StoreError>> {
        unreachable_backend()
    }

    fn query<'a>(
        &'a self,
        _query: &'a RangeQuery,
    ) -> PinFuture<'a, Result<Vec<Record>, StoreError>> {
        unreachable_backend()
    }

    fn delete<'a>(&'a self, _key: &'a RecordKey) -> PinFuture<'a, Result<(), StoreError>> {
        unreachable_backend()
    }
}
