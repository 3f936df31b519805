use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;
use crate::ServiceState;

use super::{entry_info, DriveError, EntryInfo};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub entries: Vec<EntryInfo>,
}

/// Everything under the caller's namespace, one flat listing.
pub async fn handler(
    State(state): State<ServiceState>,
    caller: Caller,
) -> Result<impl IntoResponse, DriveError> {
    let entries = state.workspace(caller.namespace).list_root().await?;

    Ok(Json(ListResponse {
        entries: entries.into_iter().map(|e| entry_info(&state, e)).collect(),
    }))
}
