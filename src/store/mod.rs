//! Key-value persistence for the three PTO collections.
//!
//! Every collection lives under a single key as one JSON array. Handlers
//! read the whole array, change it in memory and write it back; there is no
//! locking across that cycle, so the last writer wins.

pub mod file;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode `{key}`: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("cannot encode `{key}`: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Raw key-value contract. Implementations can be in-memory, file-backed
/// or a remote KV service.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Store keys, one per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Collection {
    #[strum(serialize = "employees")]
    Employees,
    #[strum(serialize = "pto-requests")]
    PtoRequests,
    #[strum(serialize = "public-holidays")]
    PublicHolidays,
}

/// A record type persisted as an element of one collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// Read a whole collection; an absent key is an empty collection.
pub async fn load_collection<T: Record>(store: &dyn KvStore) -> Result<Vec<T>, StoreError> {
    let key = T::COLLECTION.as_ref();
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|source| StoreError::Decode {
            key: key.to_owned(),
            source,
        }),
    }
}

/// Replace a whole collection.
pub async fn save_collection<T: Record>(store: &dyn KvStore, records: &[T]) -> Result<(), StoreError> {
    let key = T::COLLECTION.as_ref();
    let value = serde_json::to_value(records).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, value).await
}

pub fn find_index<T: Record>(records: &[T], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// Drop every record with `id`; returns whether anything was removed.
pub fn remove_by_id<T: Record>(records: &mut Vec<T>, id: &str) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

/// Open the backend selected in configuration.
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn KvStore>, StoreError> {
    let store: Arc<dyn KvStore> = match config.backend {
        StoreBackend::Memory => MemoryStore::new(),
        StoreBackend::File => JsonFileStore::new(&config.data_file).await?,
        StoreBackend::Redis => open_redis(config).await?,
    };
    info!(backend = %config.backend, "Store opened");
    Ok(store)
}

#[cfg(feature = "redis")]
async fn open_redis(config: &StoreConfig) -> Result<Arc<dyn KvStore>, StoreError> {
    let url = config
        .redis_url
        .as_deref()
        .ok_or_else(|| StoreError::Backend("REDIS_URL must be set for the redis backend".into()))?;
    Ok(redis_store::RedisStore::connect(url).await?)
}

#[cfg(not(feature = "redis"))]
async fn open_redis(_config: &StoreConfig) -> Result<Arc<dyn KvStore>, StoreError> {
    Err(StoreError::Backend(
        "built without the `redis` feature".into(),
    ))
}
