use axum::routing::{get, post};
use axum::Router;

pub mod login;
pub mod signup;
pub mod whoami;

// Re-export for convenience
pub use login::LoginRequest;
pub use signup::SignupRequest;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/signup", post(signup::handler))
        .route("/login", post(login::handler))
        .route("/whoami", get(whoami::handler))
        .with_state(state)
}
