use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use pantry_core::PantryItemId;

use crate::app::errors;

/// Unwrap a JSON body, mapping extractor rejections to `{"detail": ...}` errors.
///
/// The body is taken as an untyped value; field-level validation is the
/// serializer's job so every offending field can be reported at once.
pub fn parse_payload(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, Response> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonSyntaxError(e)) => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            format!("JSON parse error - {}", e.body_text()),
        )),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(errors::json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type in request; expected application/json.",
        )),
        Err(other) => Err(errors::json_error(other.status(), other.body_text())),
    }
}

/// Path ids that are not plain non-negative integers do not name a resource.
pub fn parse_id(raw: &str) -> Result<PantryItemId, Response> {
    raw.parse::<PantryItemId>().map_err(errors::domain_error_to_response)
}
