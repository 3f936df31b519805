//! Directory and file semantics synthesized from flat key operations.
//!
//! A `Workspace` is the view of the store scoped to one resolved namespace.
//! Directories exist only as common key prefixes plus a zero-byte marker
//! object; every directory operation is an enumerate + per-object
//! copy/delete sequence with no atomic primitive underneath. The one safety
//! rule all multi-step operations obey: a failure may leave data in two
//! places, never in none.

mod dirs;
mod files;

use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::namespace::{Namespace, PathError};
use crate::store::{KeyFailure, Store, StoreError};

/// Upper bound on concurrent copy calls within one rename.
const MAX_CONCURRENT_COPIES: usize = 16;

/// Content type tagged onto zero-byte directory markers.
pub(crate) const DIRECTORY_CONTENT_TYPE: &str = "application/x-directory";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("key outside namespace {namespace}: {key}")]
    OutsideNamespace { namespace: String, key: String },

    /// Some copies of a multi-key rename failed. Nothing has been deleted:
    /// the old keys are all intact and the successful copies sit alongside
    /// them. Re-running the rename is safe (copy is overwrite-safe).
    #[error("copy phase incomplete: {} of {total} keys failed", failed.len())]
    CopyIncomplete {
        total: usize,
        failed: Vec<KeyFailure>,
    },

    /// A batch delete reported per-key failures. The listed keys still
    /// exist; everything else in the batch is gone.
    #[error("delete phase incomplete: {} of {total} keys failed", failed.len())]
    DeleteIncomplete {
        total: usize,
        failed: Vec<KeyFailure>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One user's virtual filesystem.
#[derive(Clone)]
pub struct Workspace {
    store: Store,
    namespace: Namespace,
}

impl Workspace {
    pub fn new(store: Store, namespace: Namespace) -> Self {
        Self { store, namespace }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Issue every copy, wait for all of them, and only then decide.
    ///
    /// Partial completion is never success: any failure aborts the caller
    /// before its delete phase, which is what keeps rename loss-free.
    pub(crate) async fn copy_all(
        &self,
        pairs: Vec<(String, String)>,
    ) -> Result<(), WorkspaceError> {
        let total = pairs.len();
        let failed: Vec<KeyFailure> = stream::iter(pairs)
            .map(|(src, dst)| async move {
                match self.store.copy(&src, &dst).await {
                    Ok(()) => None,
                    Err(e) => Some(KeyFailure {
                        key: src,
                        reason: e.to_string(),
                    }),
                }
            })
            .buffer_unordered(MAX_CONCURRENT_COPIES)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;

        if failed.is_empty() {
            Ok(())
        } else {
            Err(WorkspaceError::CopyIncomplete { total, failed })
        }
    }

    pub(crate) async fn delete_all(&self, keys: Vec<String>) -> Result<(), WorkspaceError> {
        let total = keys.len();
        let failed = self.store.delete_many(&keys).await?;
        if failed.is_empty() {
            Ok(())
        } else {
            Err(WorkspaceError::DeleteIncomplete { total, failed })
        }
    }
}
