//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: infrastructure wiring (stores, inventory service, realtime channel)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//!
//! Public routes (`/health`, `/auth/register`, `/auth/login`, `/ws`) sit next
//! to the protected tree, which requires a bearer token.

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String) -> Router {
    let tokens = Arc::new(stockroom_auth::Hs256TokenCodec::new(jwt_secret.as_bytes()));
    let services = Arc::new(services::build_services(tokens.clone()));

    let auth_state = middleware::AuthState {
        tokens,
        users: services.users.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/ws", get(routes::realtime::ws))
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
