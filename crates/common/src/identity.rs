//! Identity-to-namespace binding.
//!
//! A verified bearer token only carries an opaque user id; the username that
//! anchors the namespace prefix lives in the user-record store and is looked
//! up again on every call. A record deleted after token issuance must lose
//! access on its very next request, so nothing here is cached.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::namespace::{Namespace, PathError};

/// Lookup into the persistent user-record store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` means the record is gone (stale identity), not a fault.
    async fn username_for(&self, id: Uuid) -> anyhow::Result<Option<String>>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("identity {0} has no backing user record")]
    IdentityNotFound(Uuid),
    #[error("user directory lookup failed: {0}")]
    Directory(#[from] anyhow::Error),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Maps an authenticated identity to the one prefix it may touch.
#[derive(Clone)]
pub struct NamespaceResolver {
    directory: Arc<dyn UserDirectory>,
}

impl NamespaceResolver {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve `id` to its namespace. No side effects; hits the directory on
    /// every call.
    pub async fn resolve(&self, id: Uuid) -> Result<Namespace, ResolveError> {
        let username = self
            .directory
            .username_for(id)
            .await?
            .ok_or(ResolveError::IdentityNotFound(id))?;
        Ok(Namespace::for_user(&username)?)
    }
}
