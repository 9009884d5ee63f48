use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use autoflex_core::ProductId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/:id/materials", get(list_materials).put(replace_materials))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let draft = match errors::json_body(body) {
        Ok(b) => match b.into_draft() {
            Ok(d) => d,
            Err(e) => return errors::domain_error_to_response(e),
        },
        Err(resp) => return resp,
    };

    match services.catalog.create_product(draft) {
        Ok(product) => {
            tracing::info!(id = %product.id_typed(), code = product.code(), "product created");
            (StatusCode::CREATED, Json(dto::ProductResponse::from(&product))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalog.list_products() {
        Ok(products) => Json(dto::products_to_json(&products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match errors::parse_id(&id, "product") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.get_product(id) {
        Ok(product) => Json(dto::ProductResponse::from(&product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match errors::parse_id(&id, "product") {
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

    match services.catalog.update_product(id, draft) {
        Ok(product) => {
            tracing::info!(%id, code = product.code(), "product updated");
            Json(dto::ProductResponse::from(&product)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match errors::parse_id(&id, "product") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.delete_product(id) {
        Ok(()) => {
            tracing::info!(%id, "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_materials(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match errors::parse_id(&id, "product") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.catalog.list_materials(id) {
        Ok(entries) => Json(dto::bom_entries_to_json(&entries)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Full replace of the product's bill of materials.
pub async fn replace_materials(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Vec<dto::ProductMaterialItemRequest>>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match errors::parse_id(&id, "product") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let items = match errors::json_body(body) {
        Ok(items) => items,
        Err(resp) => return resp,
    };
    let specs = match items
        .into_iter()
        .map(dto::ProductMaterialItemRequest::into_spec)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(specs) => specs,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.catalog.replace_materials(id, specs) {
        Ok(entries) => {
            tracing::info!(%id, lines = entries.len(), "bill of materials replaced");
            Json(dto::bom_entries_to_json(&entries)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
