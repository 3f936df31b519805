use axum::Router;

pub mod auth;
pub mod drive;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/drive", drive::router(state.clone()))
        .with_state(state)
}
