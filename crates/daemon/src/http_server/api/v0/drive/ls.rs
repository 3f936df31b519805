use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::{entry_info, DriveError, EntryInfo};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsRequest {
    /// Directory to list
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsResponse {
    pub entries: Vec<EntryInfo>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<LsRequest>,
) -> Result<impl IntoResponse, DriveError> {
    let entries = state.workspace(caller.namespace).ls(&req.directory).await?;

    Ok(Json(LsResponse {
        entries: entries.into_iter().map(|e| entry_info(&state, e)).collect(),
    }))
}
