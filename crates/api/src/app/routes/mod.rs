use axum::{routing::get, Router};

pub mod products;
pub mod raw_materials;
pub mod suggestions;
pub mod system;

/// Router for every endpoint under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/raw-materials", raw_materials::router())
        .nest("/products", products::router())
        .route("/production-suggestions", get(suggestions::production_suggestions))
}
