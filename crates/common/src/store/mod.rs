//! Flat object-store adapter.
//!
//! The store is pure key-value: put, list-by-prefix, copy, delete. There is
//! no hierarchy, no multi-key transaction, and no move primitive; each call
//! is independently fire-and-fail. Everything directory-shaped is synthesized
//! above this layer.

mod error;
mod memory;
mod s3_backend;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

pub use error::{KeyFailure, Result, StoreError};
pub use memory::MemoryStore;
pub use s3_backend::S3Store;

/// Deadline applied to every individual store call.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Metadata for one stored object, as returned by list-by-prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// The flat key operations the virtual filesystem is built from.
///
/// Implementations must keep `delete` idempotent (deleting an absent key
/// succeeds) and `list` ordered by key.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>>;

    async fn copy(&self, src: &str, dst: &str) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete a batch of keys, reporting per-key failures instead of one
    /// atomic outcome. An empty vec means every key is gone.
    async fn delete_many(&self, keys: &[String]) -> Result<Vec<KeyFailure>>;
}

/// Configuration for the object storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory storage (for tests and local development)
    #[default]
    Memory,

    /// S3-compatible storage (AWS S3, MinIO, etc.)
    S3 {
        /// S3 endpoint URL (e.g., "http://localhost:9000" for MinIO)
        endpoint: String,
        /// Region name (custom endpoints still require one)
        region: String,
        /// Access key ID
        access_key: String,
        /// Secret access key
        secret_key: String,
        /// Bucket name
        bucket: String,
        /// Use path-style instead of virtual-hosted-style addressing
        #[serde(default)]
        use_path_style: bool,
    },
}

/// Handle to a configured backend, shared across requests.
///
/// Every call runs under a per-operation deadline so one unbounded prefix
/// cannot stall a request indefinitely.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn ObjectStore>,
    op_timeout: Duration,
}

impl Store {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let inner: Arc<dyn ObjectStore> = match config {
            StoreConfig::Memory => Arc::new(MemoryStore::default()),
            StoreConfig::S3 {
                endpoint,
                region,
                access_key,
                secret_key,
                bucket,
                use_path_style,
            } => Arc::new(S3Store::connect(
                &endpoint,
                &region,
                &access_key,
                &secret_key,
                &bucket,
                use_path_style,
            )?),
        };
        Ok(Self {
            inner,
            op_timeout: DEFAULT_OP_TIMEOUT,
        })
    }

    /// In-memory store, the default test backend.
    pub fn memory() -> Self {
        Self::custom(Arc::new(MemoryStore::default()))
    }

    /// Wrap an arbitrary backend implementation.
    pub fn custom(inner: Arc<dyn ObjectStore>) -> Self {
        Self {
            inner,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    async fn deadline<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        timeout(self.op_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
    }

    pub async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.deadline(self.inner.put(key, bytes, content_type)).await
    }

    pub async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.deadline(self.inner.get(key)).await
    }

    pub async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>> {
        self.deadline(self.inner.list(prefix)).await
    }

    pub async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        self.deadline(self.inner.copy(src, dst)).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.deadline(self.inner.delete(key)).await
    }

    pub async fn delete_many(&self, keys: &[String]) -> Result<Vec<KeyFailure>> {
        // the batch deadline scales with its size; each inner delete is its
        // own network call
        let per_batch = self.op_timeout * (keys.len().max(1) as u32);
        timeout(per_batch, self.inner.delete_many(keys))
            .await
            .map_err(|_| StoreError::Timeout(per_batch))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_list_delete_roundtrip() {
        let store = Store::memory();

        store
            .put("users/a/docs/x.txt", Bytes::from("hello"), "text/plain")
            .await
            .unwrap();

        let got = store.get("users/a/docs/x.txt").await.unwrap().unwrap();
        assert_eq!(got, Bytes::from("hello"));

        let entries = store.list("users/a/").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "users/a/docs/x.txt");
        assert_eq!(entries[0].size, 5);

        store.delete("users/a/docs/x.txt").await.unwrap();
        assert!(store.get("users/a/docs/x.txt").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = Store::memory();
        store.delete("users/a/missing").await.unwrap();
    }

    #[tokio::test]
    async fn list_is_prefix_scoped_and_ordered() {
        let store = Store::memory();
        for key in ["users/b/z", "users/a/b", "users/a/a", "users/ab/x"] {
            store.put(key, Bytes::new(), "").await.unwrap();
        }

        let keys: Vec<_> = store
            .list("users/a/")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["users/a/a", "users/a/b"]);
    }

    #[tokio::test]
    async fn copy_duplicates_content() {
        let store = Store::memory();
        store
            .put("users/a/one", Bytes::from("payload"), "text/plain")
            .await
            .unwrap();
        store.copy("users/a/one", "users/a/two").await.unwrap();

        assert_eq!(
            store.get("users/a/two").await.unwrap().unwrap(),
            Bytes::from("payload")
        );
        // source untouched
        assert!(store.get("users/a/one").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn copy_of_missing_source_fails() {
        let store = Store::memory();
        let err = store.copy("users/a/nope", "users/a/dst").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_many_removes_all() {
        let store = Store::memory();
        let keys: Vec<String> = (0..3).map(|i| format!("users/a/f{i}")).collect();
        for key in &keys {
            store.put(key, Bytes::new(), "").await.unwrap();
        }

        let failed = store.delete_many(&keys).await.unwrap();
        assert!(failed.is_empty());
        assert!(store.list("users/a/").await.unwrap().is_empty());
    }

    #[test]
    fn config_deserializes_by_tag() {
        let config: StoreConfig = serde_json::from_str(
            r#"{"type":"s3","endpoint":"http://localhost:9000","region":"us-east-1",
               "access_key":"ak","secret_key":"sk","bucket":"ergon","use_path_style":true}"#,
        )
        .unwrap();
        assert!(matches!(config, StoreConfig::S3 { use_path_style: true, .. }));

        let config: StoreConfig = serde_json::from_str(r#"{"type":"memory"}"#).unwrap();
        assert!(matches!(config, StoreConfig::Memory));
    }
}
