use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use common::namespace::{Namespace, PathError};
use common::workspace::WorkspaceError;

use crate::auth::{self, PasswordError, TokenError};
use crate::database::UserStoreError;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub token: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, SignupError> {
    if req.username.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(SignupError::MissingFields);
    }

    // the username anchors the namespace prefix for the account's lifetime,
    // so it has to pass the same component rules as any path segment
    let namespace = Namespace::for_user(&req.username)?;

    let password_hash = auth::hash_password(&req.password)?;
    let user_id = state
        .database()
        .create_user(&req.username, &req.email, &password_hash)
        .await?;

    // provision the namespace marker so the new account is enumerable
    state.workspace(namespace).provision().await?;

    let token = state.tokens().issue(user_id)?;
    tracing::info!(username = %req.username, "user signed up");

    Ok((
        http::StatusCode::CREATED,
        Json(SignupResponse { token }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("username, email, and password are required")]
    MissingFields,
    #[error("invalid username: {0}")]
    Username(#[from] PathError),
    #[error(transparent)]
    User(#[from] UserStoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        match self {
            SignupError::MissingFields | SignupError::Username(_) => {
                (http::StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            SignupError::User(UserStoreError::Conflict) => {
                (http::StatusCode::CONFLICT, "username or email already exists".to_string())
                    .into_response()
            }
            _ => {
                tracing::error!("signup failed: {}", self);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
