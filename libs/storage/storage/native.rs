use native_db::{native_db, transaction, Builder, Database, Models, ToKey};
use native_model::{native_model, Model};
use once_cell::sync::Lazy;
use serde_derive::{Deserialize, Serialize};
use std::{path::Path, sync::Arc};

use crate::{PinFuture, RangeQuery, Record, RecordKey, Store, StoreError};

/// Separates partition and sort key inside the primary key. It cannot appear
/// in a partition key, so `"{partition}#"` only prefixes rows of that partition.
const KEY_SEPARATOR: char = '#';

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[native_model(id = 1, version = 1)]
#[native_db]
struct StoredItem {
    #[primary_key]
    key: String,
    partition: String,
    sort: String,
    // JSON text, the model codec cannot carry a self-describing value
    item: String,
}

impl StoredItem {
    fn try_from_record(record: &Record) -> eyre::Result<Self> {
        Ok(Self {
            key: primary_key(&record.key),
            partition: record.key.partition.clone(),
            sort: record.key.sort.clone(),
            item: serde_json::to_string(&record.item)?,
        })
    }

    fn try_into_record(self) -> eyre::Result<Record> {
        Ok(Record::new(
            RecordKey::new(self.partition, self.sort),
            serde_json::from_str(&self.item)?,
        ))
    }
}

fn primary_key(key: &RecordKey) -> String {
    format!("{}{KEY_SEPARATOR}{}", key.partition, key.sort)
}

static MODELS: Lazy<Result<Models, String>> = Lazy::new(|| {
    let mut models = Models::new();
    models
        .define::<StoredItem>()
        .map_err(|e| e.to_string())?;
    Ok(models)
});

/// Persistent store backed by a single native_db (redb) file.
#[derive(Clone)]
pub struct NativeDbStore {
    inner_storage: Arc<Database<'static>>,
    path: String,
}

impl NativeDbStore {
    pub fn try_new(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let models = MODELS
            .as_ref()
            .map_err(|e| eyre::eyre!("invalid storage model: {e}"))?;
        let db = Builder::new().create(models, path.as_ref())?;
        Ok(Self {
            inner_storage: Arc::new(db),
            path: path.as_ref().display().to_string(),
        })
    }

    /// Executes read-only operation within a transaction
    fn read_txn<F, R>(&self, f: F) -> eyre::Result<R>
    where
        F: FnOnce(transaction::RTransaction) -> eyre::Result<R>,
    {
        f(self.inner_storage.r_transaction()?)
    }

    /// Executes read-write operation within a transaction
    fn write_txn<F, R>(&self, f: F) -> eyre::Result<R>
    where
        F: FnOnce(&mut transaction::RwTransaction) -> eyre::Result<R>,
    {
        let mut txn = self.inner_storage.rw_transaction()?;
        match f(&mut txn) {
            Ok(result) => {
                txn.commit()?;
                Ok(result)
            }
            e => {
                txn.abort()?;
                e
            }
        }
    }
}

impl Store for NativeDbStore {
    fn describe(&self) -> String {
        format!("native_db storage at {}", self.path)
    }

    fn put(&self, record: Record) -> PinFuture<'_, Result<(), StoreError>> {
        Box::pin(async move {
            let item = StoredItem::try_from_record(&record)?;
            self.write_txn(|txn| {
                txn.upsert(item)?;
                Ok(())
            })?;
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<Record, StoreError>> {
        Box::pin(async move {
            let found = self.read_txn(|txn| Ok(txn.get().primary::<StoredItem>(primary_key(key))?))?;
            match found {
                Some(item) => Ok(item.try_into_record()?),
                None => Err(StoreError::NotFound),
            }
        })
    }

    fn query<'a>(
        &'a self,
        query: &'a RangeQuery,
    ) -> PinFuture<'a, Result<Vec<Record>, StoreError>> {
        Box::pin(async move {
            let prefix = format!(
                "{}{KEY_SEPARATOR}{}",
                query.partition,
                query.prefix.as_deref().unwrap_or("")
            );
            let items = self.read_txn(|txn| {
                let items = txn
                    .scan()
                    .primary::<StoredItem>()?
                    .start_with(prefix)?
                    .collect::<Result<Vec<StoredItem>, _>>()?;
                Ok(items)
            })?;

            let mut records = Vec::with_capacity(items.len());
            for item in items {
                if item.partition == query.partition && query.matches_sort(&item.sort) {
                    records.push(item.try_into_record()?);
                }
            }
            records.sort_by(|a, b| a.key.sort.cmp(&b.key.sort));
            Ok(records)
        })
    }

    fn delete<'a>(&'a self, key: &'a RecordKey) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.write_txn(|txn| {
                if let Some(item) = txn.get().primary::<StoredItem>(primary_key(key))? {
                    txn.remove(item)?;
                }
                Ok(())
            })?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn setup_database() -> (tempfile::TempDir, NativeDbStore) {
        let dir = tempdir().unwrap();
        let store = NativeDbStore::try_new(dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn record(partition: &str, sort: &str, value: i32) -> Record {
        Record::new(RecordKey::new(partition, sort), json!({ "value": value }))
    }

    #[tokio::test]
    async fn test_store_contract() -> eyre::Result<()> {
        let (_dir, store) = setup_database();
        crate::contract::check_store_contract(&store).await
    }

    #[tokio::test]
    async fn test_set_get_and_remove() -> eyre::Result<()> {
        let (_dir, store) = setup_database();
        let key = RecordKey::new("alice/chore/20180322", "c1");

        assert!(store.get(&key).await.unwrap_err().is_not_found());

        store.put(record("alice/chore/20180322", "c1", 1)).await?;
        store.put(record("alice/chore/20180322", "c1", 2)).await?;
        assert_eq!(store.get(&key).await?.item, json!({ "value": 2 }));

        store.delete(&key).await?;
        assert!(store.get(&key).await.unwrap_err().is_not_found());
        store.delete(&key).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_range_and_prefix_scans() -> eyre::Result<()> {
        let (_dir, store) = setup_database();
        store.put(record("alice/report", "20180321", 1)).await?;
        store.put(record("alice/report", "20180322", 2)).await?;
        store.put(record("alice/report", "20180402", 3)).await?;
        store.put(record("alice/pomodoro/20180322", "t1/p1", 4)).await?;
        store.put(record("alice/pomodoro/20180322", "t1/p2", 5)).await?;
        store.put(record("alice/pomodoro/20180322", "t2/p3", 6)).await?;

        let reports = store
            .query(
                &RangeQuery::partition("alice/report")
                    .lower_bound("20180321")
                    .upper_bound("20180401"),
            )
            .await?;
        let sorts: Vec<_> = reports.iter().map(|r| r.key.sort.as_str()).collect();
        assert_eq!(sorts, vec!["20180321", "20180322"]);

        let pomodoros = store
            .query(&RangeQuery::partition("alice/pomodoro/20180322").begins_with("t1/"))
            .await?;
        assert_eq!(pomodoros.len(), 2);

        let day = store
            .query(&RangeQuery::partition("alice/pomodoro/20180322"))
            .await?;
        assert_eq!(day.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_reopen_keeps_records() -> eyre::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.db");
        {
            let store = NativeDbStore::try_new(&path)?;
            store.put(record("alice/report", "20180322", 7)).await?;
        }

        let store = NativeDbStore::try_new(&path)?;
        let found = store.get(&RecordKey::new("alice/report", "20180322")).await?;
        assert_eq!(found.item, json!({ "value": 7 }));
        Ok(())
    }
}
