use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use nimbus_core::health::{healthz, readyz};
use nimbus_core::middleware::request_id_layer;

use crate::handlers::user::{create_user, get_me, get_user, get_users};
use crate::state::AppState;

pub fn build_router(state: AppState, http_timeout: Duration) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        .route("/users", get(get_users))
        .route("/users/@me", get(get_me))
        .route("/users/{id}", get(get_user))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(http_timeout)),
        )
        .with_state(state)
}
