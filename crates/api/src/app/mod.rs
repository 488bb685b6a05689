//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: session store wiring and the operations handlers call
//! - `routes/`: HTTP routes + handlers (HTML pages, JSON API, session, system)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockroom_infra::{InMemorySessionStore, SessionSeed, SessionStore};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with an in-memory store and default limits.
pub fn build_app(seed: SessionSeed) -> Router {
    build_app_with(InMemorySessionStore::new(seed))
}

/// Build the full HTTP router over the given session store (public entrypoint
/// used by `main.rs`).
pub fn build_app_with<S: SessionStore + 'static>(store: S) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    // Session-scoped routes: every request gets a SessionContext.
    let scoped = routes::router::<S>().layer(axum::middleware::from_fn_with_state(
        services.clone(),
        middleware::session_middleware::<S>,
    ));

    Router::new()
        .route("/health", get(routes::system::health::<S>))
        .merge(scoped)
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)))
}
