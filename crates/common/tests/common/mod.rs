//! Shared test utilities for workspace integration tests
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use ::common::namespace::Namespace;
use ::common::store::{KeyFailure, MemoryStore, ObjectEntry, ObjectStore, Store, StoreError};
use ::common::workspace::Workspace;

/// Set up a provisioned workspace over an in-memory store.
pub async fn setup_workspace() -> Workspace {
    let store = Store::memory();
    let namespace = Namespace::for_user("testuser").unwrap();
    let workspace = Workspace::new(store, namespace);
    workspace.provision().await.unwrap();
    workspace
}

pub fn keys(entries: &[ObjectEntry]) -> Vec<String> {
    entries.iter().map(|e| e.key.clone()).collect()
}

/// Set up a workspace over a fault-injecting store, returning both so tests
/// can arm faults and inspect what the engine actually asked the store to do.
pub async fn setup_flaky_workspace() -> (Workspace, Arc<FlakyStore>) {
    let flaky = Arc::new(FlakyStore::default());
    let store = Store::custom(flaky.clone());
    let namespace = Namespace::for_user("testuser").unwrap();
    let workspace = Workspace::new(store, namespace);
    workspace.provision().await.unwrap();
    (workspace, flaky)
}

/// Memory store wrapper that can be armed to fail copies or deletes whose
/// key contains a given fragment, and that records every delete issued.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_copies_to: Mutex<Option<String>>,
    fail_deletes_of: Mutex<Option<String>>,
    deletes_issued: Mutex<Vec<String>>,
}

impl FlakyStore {
    pub fn fail_copies_to(&self, fragment: &str) {
        *self.fail_copies_to.lock() = Some(fragment.to_string());
    }

    pub fn fail_deletes_of(&self, fragment: &str) {
        *self.fail_deletes_of.lock() = Some(fragment.to_string());
    }

    pub fn clear_faults(&self) {
        *self.fail_copies_to.lock() = None;
        *self.fail_deletes_of.lock() = None;
    }

    pub fn deletes_issued(&self) -> Vec<String> {
        self.deletes_issued.lock().clone()
    }
}

#[async_trait]
impl ObjectStore for FlakyStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.inner.put(key, bytes, content_type).await
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        self.inner.get(key).await
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StoreError> {
        self.inner.list(prefix).await
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<(), StoreError> {
        if let Some(fragment) = self.fail_copies_to.lock().as_deref() {
            if dst.contains(fragment) {
                return Err(StoreError::CopyFailed {
                    from: src.to_string(),
                    to: dst.to_string(),
                    status: 500,
                });
            }
        }
        self.inner.copy(src, dst).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.deletes_issued.lock().push(key.to_string());
        self.inner.delete(key).await
    }

    async fn delete_many(&self, keys: &[String]) -> Result<Vec<KeyFailure>, StoreError> {
        self.deletes_issued.lock().extend(keys.iter().cloned());

        let mut failed = Vec::new();
        let fragment = self.fail_deletes_of.lock().clone();
        for key in keys {
            match &fragment {
                Some(f) if key.contains(f.as_str()) => failed.push(KeyFailure {
                    key: key.clone(),
                    reason: "simulated store failure".to_string(),
                }),
                _ => {
                    self.inner.delete(key).await?;
                }
            }
        }
        Ok(failed)
    }
}
