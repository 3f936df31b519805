//! Key-path grammar for per-user namespaces.
//!
//! Every object key is built by concatenating validated components under the
//! `users/<username>/` prefix. The store itself has no hierarchy; the prefix
//! is the only isolation boundary, so no component may be empty or contain a
//! separator once it reaches key construction.

use thiserror::Error;

/// Root segment under which every user namespace lives.
pub const NAMESPACE_ROOT: &str = "users";

/// Key separator of the flat store.
pub const SEPARATOR: char = '/';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path component")]
    Empty,
    #[error("path component contains '/': {0}")]
    Separator(String),
    #[error("reserved path component: {0}")]
    Reserved(String),
}

/// Reject anything that could widen the prefix scope a key is built under.
fn validate_component(component: &str) -> Result<&str, PathError> {
    if component.is_empty() {
        return Err(PathError::Empty);
    }
    if component.contains(SEPARATOR) {
        return Err(PathError::Separator(component.to_string()));
    }
    if component == "." || component == ".." {
        return Err(PathError::Reserved(component.to_string()));
    }
    Ok(component)
}

/// The key prefix uniquely owned by one user.
///
/// Construction validates the username; the derived prefix never changes for
/// the lifetime of the account (usernames are immutable once assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    username: String,
    prefix: String,
}

impl Namespace {
    pub fn for_user(username: &str) -> Result<Self, PathError> {
        let username = validate_component(username)?;
        Ok(Self {
            username: username.to_string(),
            prefix: format!("{NAMESPACE_ROOT}{SEPARATOR}{username}{SEPARATOR}"),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The namespace prefix, `users/<username>/`. Also the key of the
    /// zero-byte marker object written at account creation.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix under which a directory's objects live: `users/<u>/<dir>/`.
    pub fn dir_prefix(&self, directory: &str) -> Result<String, PathError> {
        let directory = validate_component(directory)?;
        Ok(format!("{}{directory}{SEPARATOR}", self.prefix))
    }

    /// Full object key for a file: `users/<u>/<dir>/<filename>`.
    pub fn file_key(&self, directory: &str, filename: &str) -> Result<String, PathError> {
        let filename = validate_component(filename)?;
        Ok(format!("{}{filename}", self.dir_prefix(directory)?))
    }

    /// Whether `key` lies strictly inside this namespace.
    ///
    /// The namespace marker itself does not count: it is provisioned once and
    /// never a valid mutation target, so callers gating deletes on this check
    /// can never remove it.
    pub fn contains(&self, key: &str) -> bool {
        key.len() > self.prefix.len() && key.starts_with(self.prefix.as_str())
    }
}
