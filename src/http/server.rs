//! Router setup for the status API.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire the server registry into handler state
//! - Attach trace middleware

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::registry::ServerRegistry;

/// Application state injected into handlers.
///
/// Handlers resolve the server collections through this state rather than
/// through globals; the collections themselves are read-only.
#[derive(Clone)]
pub struct AppState {
    pub registry: ServerRegistry,
}

/// Build the router serving the status API over the given registry.
pub fn build_router(registry: ServerRegistry) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/servers", get(handlers::list_servers))
        .route("/api/gateways", get(handlers::list_gateways))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
