use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pantry_core::{DomainError, FieldErrors};
use pantry_infra::StoreError;

pub const SERVER_ERROR_DETAIL: &str = "A server error occurred.";

pub fn store_error_to_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => not_found(),
        other => {
            tracing::error!(error = %other, "store operation failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_DETAIL)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(errors) => validation_error(errors),
        // Identifiers only arrive through the path; a bad one never matched a route.
        DomainError::InvalidId(_) | DomainError::NotFound => not_found(),
    }
}

/// 400 with `{"field": ["message", ...]}`.
pub fn validation_error(errors: FieldErrors) -> Response {
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

/// 404 with an empty body.
pub fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

pub fn json_error(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "detail": detail.into(),
        })),
    )
        .into_response()
}
