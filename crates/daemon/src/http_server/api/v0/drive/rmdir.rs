use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmdirRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmdirResponse {
    pub name: String,
}

/// Recursively delete a directory and everything under it.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<RmdirRequest>,
) -> Result<impl IntoResponse, DriveError> {
    state.workspace(caller.namespace).rmdir(&req.name).await?;
    tracing::info!(directory = %req.name, "directory removed");

    Ok(Json(RmdirResponse { name: req.name }))
}
