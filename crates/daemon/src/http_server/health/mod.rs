mod readyz;

use axum::routing::get;
use axum::Router;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/readyz", get(readyz::handler))
        .with_state(state)
}
