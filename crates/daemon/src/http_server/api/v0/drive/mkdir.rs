use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MkdirRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MkdirResponse {
    pub name: String,
}

/// Create a directory. Creating one that already exists succeeds.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<MkdirRequest>,
) -> Result<impl IntoResponse, DriveError> {
    state.workspace(caller.namespace).mkdir(&req.name).await?;

    Ok(Json(MkdirResponse { name: req.name }))
}
