use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmRequest {
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmResponse {
    pub directory: String,
    pub filename: String,
}

/// Delete one file. Deleting a file that is already gone succeeds.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<RmRequest>,
) -> Result<impl IntoResponse, DriveError> {
    state
        .workspace(caller.namespace)
        .rm(&req.directory, &req.filename)
        .await?;

    Ok(Json(RmResponse {
        directory: req.directory,
        filename: req.filename,
    }))
}
