use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MvRequest {
    /// Current directory name
    pub old_name: String,
    /// New directory name
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MvResponse {
    pub old_name: String,
    pub new_name: String,
}

/// Rename a directory.
///
/// On partial failure the response body lists the keys that did not make it;
/// nothing is deleted until every key has copied, so re-issuing the same
/// request after a failure is always safe.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<MvRequest>,
) -> Result<impl IntoResponse, DriveError> {
    state
        .workspace(caller.namespace)
        .rename_dir(&req.old_name, &req.new_name)
        .await?;
    tracing::info!(from = %req.old_name, to = %req.new_name, "directory renamed");

    Ok(Json(MvResponse {
        old_name: req.old_name,
        new_name: req.new_name,
    }))
}
