use axum::extract::{Json, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::DriveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmManyRequest {
    /// Full object keys, as previously returned by a listing.
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RmManyResponse {
    pub deleted: usize,
}

/// Batch-delete caller-selected objects.
///
/// The keys come straight from the client, so every one is re-checked
/// against the caller's namespace before any delete is issued; a single
/// out-of-scope key rejects the whole batch.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
    Json(req): Json<RmManyRequest>,
) -> Result<impl IntoResponse, DriveError> {
    let deleted = req.keys.len();
    state.workspace(caller.namespace).rm_keys(req.keys).await?;

    Ok(Json(RmManyResponse { deleted }))
}
