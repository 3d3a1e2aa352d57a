use derive_more::{Deref, DerefMut};
use kitchen_storage::{RangeQuery, Record, RecordKey, StoreBox};
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, sync::Arc};

use crate::{key::Kind, IdGenerator, Result};

/// Anything the repository can store: it knows its kind, derives its own key
/// and checks its own invariants before every write.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: Kind;

    fn key(&self) -> RecordKey;

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// An entity together with the key it was loaded from or created at.
#[derive(Clone, Debug, PartialEq, Deref, DerefMut)]
pub struct Handle<E> {
    key: RecordKey,
    #[deref]
    #[deref_mut]
    entity: E,
}

impl<E> Handle<E> {
    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    pub fn into_inner(self) -> E {
        self.entity
    }
}

/// Keyed access to one kind of entity over the shared store.
#[derive(Clone)]
pub struct Repository<E: Entity> {
    store: StoreBox,
    ids: Arc<IdGenerator>,
    _marker: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(store: StoreBox, ids: Arc<IdGenerator>) -> Self {
        Self {
            store,
            ids,
            _marker: PhantomData,
        }
    }

    /// Create an entity identified by a freshly generated id.
    pub async fn create<F>(&self, build: F) -> Result<Handle<E>>
    where
        F: FnOnce(String) -> E,
    {
        let id = self.ids.generate()?;
        self.insert(build(id)).await
    }

    /// Write an entity whose key does not depend on a generated id.
    pub async fn insert(&self, entity: E) -> Result<Handle<E>> {
        entity.validate()?;
        let key = entity.key();
        self.put(&key, &entity).await?;
        tracing::debug!(kind = %E::KIND, %key, "entity created");
        Ok(Handle { key, entity })
    }

    pub async fn get(&self, key: &RecordKey) -> Result<Option<Handle<E>>> {
        match self.store.get(key).await {
            Ok(record) => {
                let entity = serde_json::from_value(record.item)?;
                Ok(Some(Handle {
                    key: record.key,
                    entity,
                }))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self, query: &RangeQuery) -> Result<Vec<E>> {
        let records = self.store.query(query).await?;
        let entities = records
            .into_iter()
            .map(|record| serde_json::from_value(record.item))
            .collect::<core::result::Result<Vec<E>, _>>()?;
        Ok(entities)
    }

    /// Overwrite the record the handle points to with its current content.
    pub async fn update(&self, handle: &Handle<E>) -> Result<()> {
        handle.entity.validate()?;
        self.put(&handle.key, &handle.entity).await?;
        tracing::debug!(kind = %E::KIND, key = %handle.key, "entity updated");
        Ok(())
    }

    /// Remove the record and give back its last content. The handle is
    /// consumed, a deleted entity can't be written again through it:
    ///
    /// ```compile_fail
    /// # use kitchen_core::{entities::Task, repository::Repository, RecordKey};
    /// # async fn reuse(tasks: Repository<Task>, key: RecordKey) -> kitchen_core::Result<()> {
    /// let task = tasks.get(&key).await?.unwrap();
    /// tasks.delete(task).await?;
    /// tasks.update(&task).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, handle: Handle<E>) -> Result<E> {
        self.store.delete(&handle.key).await?;
        tracing::debug!(kind = %E::KIND, key = %handle.key, "entity deleted");
        Ok(handle.entity)
    }

    async fn put(&self, key: &RecordKey, entity: &E) -> Result<()> {
        let item = serde_json::to_value(entity)?;
        self.store.put(Record::new(key.clone(), item)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{Report, ReportStatus, Task},
        key,
        test_support::{CountingStore, FailingStore},
    };
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 3, 22).unwrap()
    }

    fn repository<E: Entity>(store: StoreBox) -> Repository<E> {
        Repository::new(store, Arc::new(IdGenerator::new()))
    }

    #[tokio::test]
    async fn test_create_get_update_delete() -> eyre::Result<()> {
        let tasks = repository::<Task>(CountingStore::in_memory().into_box());

        let created = tasks
            .create(|id| {
                Task::builder()
                    .user_id("alice")
                    .date(day())
                    .task_id(id)
                    .title("first")
                    .build()
            })
            .await?;
        assert_eq!(created.key().sort, created.task_id);

        let mut loaded = tasks.get(created.key()).await?.unwrap();
        assert_eq!(*loaded, *created);

        loaded.description = "details".to_owned();
        tasks.update(&loaded).await?;
        let reloaded = tasks.get(created.key()).await?.unwrap();
        assert_eq!(reloaded.description, "details");

        let removed = tasks.delete(reloaded).await?;
        assert_eq!(removed.title, "first");
        assert!(tasks.get(created.key()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_entity_is_never_written() -> eyre::Result<()> {
        let store = CountingStore::in_memory();
        let tasks = repository::<Task>(store.clone().into_box());

        let result = tasks
            .create(|id| {
                Task::builder()
                    .user_id("alice")
                    .date(day())
                    .task_id(id)
                    .tomato_num(0)
                    .build()
            })
            .await;
        assert!(result.unwrap_err().is_bad_request());
        assert_eq!(store.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_scans_partition_in_order() -> eyre::Result<()> {
        let reports = repository::<Report>(CountingStore::in_memory().into_box());
        for d in [23, 21, 22] {
            let date = NaiveDate::from_ymd_opt(2018, 3, d).unwrap();
            reports
                .insert(Report::builder().user_id("alice").date(date).build())
                .await?;
        }
        reports
            .insert(Report::builder().user_id("bob").date(day()).build())
            .await?;

        let listed = reports
            .list(&RangeQuery::partition(key::report_partition("alice")))
            .await?;
        let days: Vec<_> = listed.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(days, vec!["2018-03-21", "2018-03-22", "2018-03-23"]);
        assert!(listed.iter().all(|r| r.status == ReportStatus::Editing));
        Ok(())
    }

    #[tokio::test]
    async fn test_backend_failure_is_a_system_error() {
        let reports = repository::<Report>(FailingStore.into_box());
        let err = reports
            .get(&key::report_key("alice", day()))
            .await
            .unwrap_err();
        assert!(err.user_error().is_none());
    }
}
