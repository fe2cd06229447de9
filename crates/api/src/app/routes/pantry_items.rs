use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;

use pantry_inventory::PantryItemSerializer;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub const COLLECTION_PATH: &str = "/pantry-items/";
pub const ITEM_PATH: &str = "/pantry-items/:id/";

pub fn router() -> Router {
    Router::new()
        .route(COLLECTION_PATH, get(list_items).post(create_item))
        .route(
            ITEM_PATH,
            get(get_item)
                .put(replace_item)
                .patch(update_item)
                .delete(delete_item),
        )
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store().list().await {
        Ok(items) => {
            let body = items
                .iter()
                .map(PantryItemSerializer::to_representation)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(Value::Array(body))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::parse_payload(payload) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let draft = match PantryItemSerializer::validate(&body) {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().create(draft).await {
        Ok(item) => {
            tracing::info!(id = %item.id, name = %item.name, "pantry item created");
            (StatusCode::CREATED, Json(PantryItemSerializer::to_representation(&item))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().get(id).await {
        Ok(item) => (StatusCode::OK, Json(PantryItemSerializer::to_representation(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PUT: full replacement; every required field must be present.
pub async fn replace_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    write_item(services, id, payload, false).await
}

/// PATCH: only the supplied fields change.
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    write_item(services, id, payload, true).await
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.store().delete(id).await {
        Ok(()) => {
            tracing::info!(id = %id, "pantry item deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

async fn write_item(
    services: Arc<AppServices>,
    id: String,
    payload: Result<Json<Value>, JsonRejection>,
    partial: bool,
) -> axum::response::Response {
    let id = match dto::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // Resolve the record before looking at the body: unknown ids are 404
    // whatever the payload.
    let existing = match services.store().get(id).await {
        Ok(item) => item,
        Err(e) => return errors::store_error_to_response(e),
    };

    let body = match dto::parse_payload(payload) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let validated = if partial {
        PantryItemSerializer::validate_partial(&body, &existing)
    } else {
        PantryItemSerializer::validate(&body)
    };
    let draft = match validated {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().replace(id, draft).await {
        Ok(item) => {
            tracing::info!(id = %item.id, partial, "pantry item updated");
            (StatusCode::OK, Json(PantryItemSerializer::to_representation(&item))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
