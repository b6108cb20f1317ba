use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use serde_json::Value;

use super::{KvStore, StoreError};

/// Redis-backed store. Each collection is one string key holding JSON.
pub struct RedisStore {
    conn: ConnectionManager,
}

fn backend(e: redis::RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Arc<Self>, StoreError> {
        let client = redis::Client::open(url).map_err(backend)?;
        let conn = client.get_connection_manager().await.map_err(backend)?;
        Ok(Arc::new(Self { conn }))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await.map_err(backend)?;
        raw.map(|text| {
            serde_json::from_str(&text).map_err(|source| StoreError::Decode {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(&value).map_err(|source| StoreError::Encode {
            key: key.to_owned(),
            source,
        })?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, text).await.map_err(backend)
    }
}
