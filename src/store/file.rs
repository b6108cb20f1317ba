use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};

use super::{KvStore, StoreError};

/// JSON file-backed key-value store.
///
/// Keeps every key in one `HashMap<String, Value>` mirrored to a single JSON
/// document. The file is rewritten on each `set`.
pub struct JsonFileStore {
    inner: RwLock<HashMap<String, Value>>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<String, Value> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                key: file_path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty = HashMap::new();
                write_map(&file_path, &empty).await?;
                empty
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: file_path,
                    source,
                });
            }
        };

        Ok(Arc::new(Self {
            inner: RwLock::new(map),
            file_path,
        }))
    }
}

async fn write_map(path: &PathBuf, map: &HashMap<String, Value>) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(map).map_err(|source| StoreError::Encode {
        key: path.display().to_string(),
        source,
    })?;
    fs::write(path, data).await.map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        // Held across the write so two saves never interleave on disk.
        let mut map = self.inner.write().await;
        let previous = map.insert(key.to_owned(), value);
        if let Err(e) = write_map(&self.file_path, &map).await {
            match previous {
                Some(old) => map.insert(key.to_owned(), old),
                None => map.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
