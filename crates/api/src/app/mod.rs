//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the catalog store and planner shared by every handler
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
