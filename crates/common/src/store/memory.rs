//! In-memory backend for tests and local development.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::error::{KeyFailure, Result, StoreError};
use super::{ObjectEntry, ObjectStore};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Bytes,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// BTreeMap-backed store; the sorted map gives list-by-prefix the same
/// key ordering S3 does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.objects.lock().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.objects.lock().get(key).map(|o| o.bytes.clone()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>> {
        let objects = self.objects.lock();
        let entries = objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| ObjectEntry {
                key: key.clone(),
                size: object.bytes.len() as u64,
                last_modified: object.last_modified,
            })
            .collect();
        Ok(entries)
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let mut objects = self.objects.lock();
        let source = objects
            .get(src)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(src.to_string()))?;
        objects.insert(
            dst.to_string(),
            StoredObject {
                bytes: source.bytes,
                content_type: source.content_type,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // absent keys delete cleanly, matching S3
        self.objects.lock().remove(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<Vec<KeyFailure>> {
        let mut objects = self.objects.lock();
        for key in keys {
            objects.remove(key);
        }
        Ok(Vec::new())
    }
}
