use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::store::ObjectEntry;
use common::workspace::WorkspaceError;

pub mod add;
pub mod list;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod rename;
pub mod rm;
pub mod rm_many;
pub mod rmdir;

// Re-export for convenience
pub use ls::LsRequest;
pub use mkdir::MkdirRequest;
pub use mv::MvRequest;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/list", post(list::handler))
        .route("/ls", post(ls::handler))
        .route("/mkdir", post(mkdir::handler))
        .route("/rmdir", post(rmdir::handler))
        .route("/mv", post(mv::handler))
        .route("/add", post(add::handler))
        .route("/rm", post(rm::handler))
        .route("/rm-many", post(rm_many::handler))
        .route("/rename", post(rename::handler))
        .with_state(state)
}

/// One listing entry as it goes over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInfo {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub(crate) fn entry_info(state: &ServiceState, entry: ObjectEntry) -> EntryInfo {
    let url = state
        .public_base_url()
        .map(|base| format!("{}/{}", base.trim_end_matches('/'), entry.key));
    EntryInfo {
        key: entry.key,
        size: entry.size,
        last_modified: entry.last_modified,
        url,
    }
}

/// Shared HTTP mapping for workspace failures.
///
/// Entity-absent is a 404, never a server fault; policy rejections map to
/// 4xx; partial copy/delete outcomes are 500s that carry the affected keys
/// so the caller can retry or clean up.
#[derive(Debug)]
pub struct DriveError(pub WorkspaceError);

impl From<WorkspaceError> for DriveError {
    fn from(err: WorkspaceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DriveError {
    fn into_response(self) -> Response {
        match self.0 {
            WorkspaceError::Path(e) => {
                (http::StatusCode::BAD_REQUEST, format!("invalid path: {}", e)).into_response()
            }
            WorkspaceError::DirectoryNotFound(name) => (
                http::StatusCode::NOT_FOUND,
                format!("directory not found: {}", name),
            )
                .into_response(),
            WorkspaceError::OutsideNamespace { key, .. } => (
                http::StatusCode::FORBIDDEN,
                format!("key outside caller namespace: {}", key),
            )
                .into_response(),
            WorkspaceError::CopyIncomplete { total, failed } => {
                tracing::error!(total, failed = failed.len(), "copy phase incomplete");
                let body = serde_json::json!({
                    "message": "rename incomplete: data remains under both names; retry the rename",
                    "failed_keys": failed.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(),
                });
                (http::StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            WorkspaceError::DeleteIncomplete { total, failed } => {
                tracing::error!(total, failed = failed.len(), "delete phase incomplete");
                let body = serde_json::json!({
                    "message": "delete incomplete: the listed keys still exist",
                    "failed_keys": failed.iter().map(|f| f.key.as_str()).collect::<Vec<_>>(),
                });
                (http::StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            WorkspaceError::Store(e) => {
                tracing::error!("store call failed: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
