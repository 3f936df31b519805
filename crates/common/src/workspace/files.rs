//! File operations: list, upload, delete, batch delete, rename.

use bytes::Bytes;

use crate::store::ObjectEntry;

use super::{Workspace, WorkspaceError};

impl Workspace {
    /// Keys under one directory prefix. Empty is a valid answer.
    pub async fn ls(&self, directory: &str) -> Result<Vec<ObjectEntry>, WorkspaceError> {
        let prefix = self.namespace.dir_prefix(directory)?;
        Ok(self.store.list(&prefix).await?)
    }

    /// Store a file, returning the key it was written under.
    ///
    /// Last write wins: an existing object at the same key is overwritten
    /// without warning. There is no versioning and no conflict detection.
    pub async fn upload(
        &self,
        directory: &str,
        filename: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, WorkspaceError> {
        let key = self.namespace.file_key(directory, filename)?;
        self.store.put(&key, bytes, content_type).await?;
        Ok(key)
    }

    /// Delete one file. Absent keys delete cleanly (the store's own
    /// semantics, preserved here), so this is retry-safe and raises no
    /// not-found.
    pub async fn rm(&self, directory: &str, filename: &str) -> Result<(), WorkspaceError> {
        let key = self.namespace.file_key(directory, filename)?;
        self.store.delete(&key).await?;
        Ok(())
    }

    /// Batch-delete caller-supplied keys.
    ///
    /// The keys arrive raw from the client, so every one of them is checked
    /// against the namespace before any call reaches the store; a single
    /// out-of-scope key rejects the whole batch with nothing deleted. The
    /// namespace marker itself never passes the check.
    pub async fn rm_keys(&self, keys: Vec<String>) -> Result<(), WorkspaceError> {
        for key in &keys {
            if !self.namespace.contains(key) {
                return Err(WorkspaceError::OutsideNamespace {
                    namespace: self.namespace.prefix().to_string(),
                    key: key.clone(),
                });
            }
        }
        if keys.is_empty() {
            return Ok(());
        }
        self.delete_all(keys).await
    }

    /// Rename one file: copy to the new key, then delete the old one.
    ///
    /// A failed copy aborts with the old key intact. A failed delete after a
    /// successful copy leaves the file under both keys and says so
    /// (`DeleteIncomplete` naming the old key) rather than reporting success.
    pub async fn rename_file(
        &self,
        directory: &str,
        old_filename: &str,
        new_filename: &str,
    ) -> Result<(), WorkspaceError> {
        let old_key = self.namespace.file_key(directory, old_filename)?;
        let new_key = self.namespace.file_key(directory, new_filename)?;

        self.store.copy(&old_key, &new_key).await?;
        self.delete_all(vec![old_key]).await
    }
}
