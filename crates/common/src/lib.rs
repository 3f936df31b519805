/**
 * Identity-to-namespace binding.
 *  Maps an authenticated user id to the key prefix
 *  that user is permitted to touch, looked up fresh
 *  on every call.
 */
pub mod identity;
/**
 * Key-path grammar. Validates path components and
 *  builds object keys so that nothing containing a
 *  separator ever escapes its prefix scope.
 */
pub mod namespace;
/**
 * Flat object-store adapter.
 *  Put / list-by-prefix / copy / batch-delete over
 *  pluggable backends (in-memory, S3-compatible).
 */
pub mod store;
/**
 * The virtual filesystem layer: directory and file
 *  semantics synthesized from flat key operations,
 *  scoped to one user's namespace.
 */
pub mod workspace;

pub mod prelude {
    pub use crate::identity::{NamespaceResolver, ResolveError, UserDirectory};
    pub use crate::namespace::{Namespace, PathError};
    pub use crate::store::{KeyFailure, ObjectEntry, ObjectStore, Store, StoreConfig, StoreError};
    pub use crate::workspace::{Workspace, WorkspaceError};
}
