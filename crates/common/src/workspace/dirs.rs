//! Directory operations: list root, create, recursive delete, rename.

use bytes::Bytes;

use crate::store::ObjectEntry;

use super::{Workspace, WorkspaceError, DIRECTORY_CONTENT_TYPE};

impl Workspace {
    /// Write the namespace marker. Invoked once at account creation;
    /// idempotent, so re-provisioning an existing namespace is harmless.
    pub async fn provision(&self) -> Result<(), WorkspaceError> {
        self.store
            .put(self.namespace.prefix(), Bytes::new(), DIRECTORY_CONTENT_TYPE)
            .await?;
        Ok(())
    }

    /// Every key under the namespace, all depths, markers included.
    ///
    /// The listing is deliberately flat: callers group by path segment if
    /// they want a tree. An empty namespace lists as empty, not as an error.
    pub async fn list_root(&self) -> Result<Vec<ObjectEntry>, WorkspaceError> {
        Ok(self.store.list(self.namespace.prefix()).await?)
    }

    /// Create a directory by writing its zero-byte marker.
    ///
    /// Re-creating an existing directory overwrites the marker and succeeds;
    /// "already existed" and "created" are indistinguishable on purpose, which
    /// also makes concurrent creates of the same name safe.
    pub async fn mkdir(&self, name: &str) -> Result<(), WorkspaceError> {
        let marker = self.namespace.dir_prefix(name)?;
        self.store
            .put(&marker, Bytes::new(), DIRECTORY_CONTENT_TYPE)
            .await?;
        Ok(())
    }

    /// Recursively delete a directory: enumerate its prefix, then one batch
    /// delete over every key found, marker included.
    ///
    /// An empty enumeration is `DirectoryNotFound`. Enumeration has no side
    /// effects, so a failed delete leaves the directory untouched and the
    /// whole operation safe to retry; per-key failures surface as
    /// `DeleteIncomplete`.
    pub async fn rmdir(&self, name: &str) -> Result<(), WorkspaceError> {
        let prefix = self.namespace.dir_prefix(name)?;
        let entries = self.store.list(&prefix).await?;
        if entries.is_empty() {
            return Err(WorkspaceError::DirectoryNotFound(name.to_string()));
        }

        let keys: Vec<String> = entries.into_iter().map(|e| e.key).collect();
        tracing::debug!(directory = name, keys = keys.len(), "removing directory");
        self.delete_all(keys).await
    }

    /// Rename a directory by copying every key under the old prefix to its
    /// counterpart under the new prefix, then deleting the old keys.
    ///
    /// All copies are attempted and awaited before any delete is issued. If
    /// any copy fails the delete phase never runs: data ends up duplicated,
    /// never lost, and the error names the keys still to copy. The sequence
    /// is idempotent end to end, so the recommended recovery is simply to run
    /// the same rename again. That same property means a rename onto an
    /// existing directory merges into it, last write wins per key, rather
    /// than being rejected: a target-exists check could not tell a real
    /// sibling from the leftovers of an interrupted earlier attempt.
    pub async fn rename_dir(&self, old_name: &str, new_name: &str) -> Result<(), WorkspaceError> {
        let old_prefix = self.namespace.dir_prefix(old_name)?;
        let new_prefix = self.namespace.dir_prefix(new_name)?;

        let entries = self.store.list(&old_prefix).await?;
        if entries.is_empty() {
            return Err(WorkspaceError::DirectoryNotFound(old_name.to_string()));
        }

        let old_keys: Vec<String> = entries.into_iter().map(|e| e.key).collect();
        let pairs: Vec<(String, String)> = old_keys
            .iter()
            .map(|key| {
                let rest = key
                    .strip_prefix(old_prefix.as_str())
                    .expect("listed key must start with the prefix it was listed under");
                (key.clone(), format!("{new_prefix}{rest}"))
            })
            .collect();

        tracing::debug!(
            from = old_name,
            to = new_name,
            keys = pairs.len(),
            "renaming directory"
        );
        self.copy_all(pairs).await?;
        self.delete_all(old_keys).await
    }
}
