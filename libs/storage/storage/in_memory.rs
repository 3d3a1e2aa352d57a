use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{PinFuture, RangeQuery, Record, RecordKey, Store, StoreError};

/// This storage type is used for testing, data is not persisted to disk but
/// only present in memory
#[derive(Default)]
pub struct InMemoryStore {
    items: RwLock<BTreeMap<RecordKey, serde_json::Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    fn describe(&self) -> String {
        "in memory storage".to_owned()
    }

    fn put(&self, record: Record) -> PinFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            self.items.write().await.insert(record.key, record.item);
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<Record, StoreError>> {
        Box::pin(async move {
            let items = self.items.read().await;
            let item = items.get(key).ok_or(StoreError::NotFound)?;
            Ok(Record::new(key.clone(), item.clone()))
        })
    }

    fn query<'a>(
        &'a self,
        query: &'a RangeQuery,
    ) -> PinFuture<'a, Result<Vec<Record>, StoreError>> {
        Box::pin(async move {
            let start = RecordKey::new(
                query.partition.clone(),
                query.lower.clone().unwrap_or_default(),
            );
            let items = self.items.read().await;
            let records = items
                .range(start..)
                .take_while(|(key, _)| key.partition == query.partition)
                .filter(|(key, _)| query.matches_sort(&key.sort))
                .map(|(key, item)| Record::new(key.clone(), item.clone()))
                .collect();
            Ok(records)
        })
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.items.write().await.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(partition: &str, sort: &str) -> Record {
        Record::new(RecordKey::new(partition, sort), json!({ "sort": sort }))
    }

    #[tokio::test]
    async fn test_store_contract() -> eyre::Result<()> {
        crate::contract::check_store_contract(&InMemoryStore::new()).await
    }

    #[tokio::test]
    async fn test_put_get_delete() -> eyre::Result<()> {
        let store = InMemoryStore::new();
        let key = RecordKey::new("alice/task/20180322", "t1");

        assert!(store.get(&key).await.unwrap_err().is_not_found());

        store.put(record("alice/task/20180322", "t1")).await?;
        assert_eq!(store.get(&key).await?.item, json!({ "sort": "t1" }));

        store.delete(&key).await?;
        assert!(store.get(&key).await.unwrap_err().is_not_found());

        // deleting an absent key succeeds
        store.delete(&key).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_query_stays_in_partition() -> eyre::Result<()> {
        let store = InMemoryStore::new();
        store.put(record("alice/report", "20180321")).await?;
        store.put(record("alice/report", "20180322")).await?;
        store.put(record("alice/report", "20180402")).await?;
        store.put(record("alice/reportx", "20180322")).await?;
        store.put(record("bob/report", "20180322")).await?;

        let query = RangeQuery::partition("alice/report")
            .lower_bound("20180322")
            .upper_bound("20180401");
        let found = store.query(&query).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, RecordKey::new("alice/report", "20180322"));

        let all = store.query(&RangeQuery::partition("alice/report")).await?;
        let sorts: Vec<_> = all.iter().map(|r| r.key.sort.as_str()).collect();
        assert_eq!(sorts, vec!["20180321", "20180322", "20180402"]);
        Ok(())
    }
}
