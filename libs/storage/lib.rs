use std::{future::Future, pin::Pin, str::FromStr};

mod kv {
    pub(crate) mod error;
    pub(crate) mod record;
    pub(crate) mod store;
}

pub use kv::{
    error::StoreError,
    record::{RangeQuery, Record, RecordKey},
    store::{Store, StoreBox},
};

pub mod storage {
    pub mod in_memory;
    #[cfg(feature = "native-db")]
    pub mod native;
}

pub type PinFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::EnumString, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinStorageType {
    #[cfg(feature = "native-db")]
    NativeDb,
    InMemory,
}

impl BuiltinStorageType {
    pub fn parse(backend: &str) -> eyre::Result<Self> {
        Self::from_str(backend).map_err(|_| eyre::eyre!("unknown storage backend '{backend}'"))
    }
}

/// Open the store of the given type; `location` is the directory holding the
/// database file for persistent backends.
#[cfg_attr(not(feature = "native-db"), allow(unused_variables))]
pub fn open_store(
    storage_type: BuiltinStorageType,
    location: &std::path::Path,
) -> eyre::Result<StoreBox> {
    let store = match storage_type {
        #[cfg(feature = "native-db")]
        BuiltinStorageType::NativeDb => open_native_db(location)?,
        BuiltinStorageType::InMemory => StoreBox::new(storage::in_memory::InMemoryStore::new()),
    };

    tracing::info!(storage = %store.describe(), "storage opened");
    Ok(store)
}

#[cfg(feature = "native-db")]
fn open_native_db(location: &std::path::Path) -> eyre::Result<StoreBox> {
    std::fs::create_dir_all(location)?;
    let db_path = location.join("kitchen.db");
    let store = storage::native::NativeDbStore::try_new(&db_path)
        .map_err(|e| eyre::eyre!("Couldn't initialize storage on path {db_path:?}: {e}"))?;
    Ok(StoreBox::new(store))
}
