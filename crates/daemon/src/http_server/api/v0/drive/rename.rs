use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    pub directory: String,
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameResponse {
    pub directory: String,
    pub old_name: String,
    pub new_name: String,
}

/// Rename one file within a directory (copy, then delete).
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<RenameRequest>,
) -> Result<impl IntoResponse, DriveError> {
    state
        .workspace(caller.namespace)
        .rename_file(&req.directory, &req.old_name, &req.new_name)
        .await?;

    Ok(Json(RenameResponse {
        directory: req.directory,
        old_name: req.old_name,
        new_name: req.new_name,
    }))
}
