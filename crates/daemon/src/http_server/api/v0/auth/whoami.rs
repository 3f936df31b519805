use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::Caller;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoamiResponse {
    pub username: String,
}

pub async fn handler(caller: Caller) -> impl IntoResponse {
    Json(WhoamiResponse {
        username: caller.username().to_string(),
    })
}
