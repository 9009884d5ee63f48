use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn production_suggestions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.suggest() {
        Ok(plan) => Json(plan).into_response(),
        Err(e) => errors::planning_error_to_response(e),
    }
}
