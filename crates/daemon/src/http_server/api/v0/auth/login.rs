use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::auth::{self, PasswordError, TokenError};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email; one field serves both.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    let user = state
        .database()
        .find_user(&req.username)
        .await?
        .ok_or(LoginError::InvalidCredentials)?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        return Err(LoginError::InvalidCredentials);
    }

    let token = state.tokens().issue(user.id)?;
    tracing::debug!(username = %user.username, "user logged in");

    Ok(Json(LoginResponse { token }).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("username and password are required")]
    MissingFields,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::MissingFields => {
                (http::StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            // one message for unknown user and wrong password alike
            LoginError::InvalidCredentials => {
                (http::StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }
            _ => {
                tracing::error!("login failed: {}", self);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
