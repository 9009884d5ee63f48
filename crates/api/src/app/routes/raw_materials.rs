use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use autoflex_core::RawMaterialId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_raw_material).get(list_raw_materials))
        .route(
            "/:id",
            get(get_raw_material)
                .put(update_raw_material)
                .delete(delete_raw_material),
        )
}

pub async fn create_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RawMaterialRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match errors::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.create_raw_material(draft) {
        Ok(material) => {
            tracing::info!(id = %material.id_typed(), code = material.code(), "raw material created");
            (StatusCode::CREATED, Json(dto::RawMaterialResponse::from(&material))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_raw_materials(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog.list_raw_materials() {
        Ok(materials) => Json(dto::raw_materials_to_json(&materials)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RawMaterialId = match errors::parse_id(&id, "raw material") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.get_raw_material(id) {
        Ok(material) => Json(dto::RawMaterialResponse::from(&material)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::RawMaterialRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: RawMaterialId = match errors::parse_id(&id, "raw material") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let draft = match errors::json_body(body) {
        Ok(b) => match b.into_draft() {
            Ok(d) => d,
            Err(e) => return errors::domain_error_to_response(e),
        },
        Err(resp) => return resp,
    };

    match services.catalog.update_raw_material(id, draft) {
        Ok(material) => {
            tracing::info!(%id, code = material.code(), "raw material updated");
            Json(dto::RawMaterialResponse::from(&material)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: RawMaterialId = match errors::parse_id(&id, "raw material") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_raw_material(id) {
        Ok(()) => {
            tracing::info!(%id, "raw material deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
