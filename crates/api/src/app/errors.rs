use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use autoflex_core::DomainError;
use autoflex_infra::CatalogStoreError;
use autoflex_planning::PlanningError;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    tracing::warn!(error = %err, "request rejected");
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(what) => json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found")),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn store_error_to_response(err: CatalogStoreError) -> Response {
    match err {
        CatalogStoreError::Domain(e) => domain_error_to_response(e),
        CatalogStoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "catalog store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", msg)
        }
    }
}

pub fn planning_error_to_response(err: PlanningError) -> Response {
    match err {
        PlanningError::DataInconsistency(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "data_inconsistency", msg)
        }
        PlanningError::Source(msg) => json_error(StatusCode::SERVICE_UNAVAILABLE, "source_unavailable", msg),
    }
}

/// Unwrap a JSON body, turning malformed payloads into a `400`.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "malformed request body");
            Err(json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text()))
        }
    }
}

pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("invalid {what} id")))
}
