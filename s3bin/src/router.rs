//! HTTP router for s3bin

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use s3bin_auth::{require_basic_auth, CredentialGate};
use s3bin_relay::{handlers, storage::ObjectStorage, RelayState};

use crate::config::Config;

/// Service state for the main router
pub struct AppState {
    relay: Arc<RelayState>,
    gate: Arc<CredentialGate>,
}

impl AppState {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: &Config) -> Self {
        Self::from_parts(
            RelayState::new(storage, config.bucket.clone(), config.path.clone()),
            CredentialGate::new(&config.user, &config.pass, &config.realm),
        )
    }

    pub fn from_parts(relay: RelayState, gate: CredentialGate) -> Self {
        Self {
            relay: Arc::new(relay),
            gate: Arc::new(gate),
        }
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // Uploads have no size limit and need credentials
    let write_routes = Router::new()
        .route("/bin", post(handlers::post_bin))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_basic_auth,
        ))
        .layer(DefaultBodyLimit::disable());

    Router::new()
        // Liveness check, unauthenticated
        .route("/ping", get(handlers::ping))
        .merge(write_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state.relay)
}
