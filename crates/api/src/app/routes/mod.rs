use axum::{Router, routing::get};

pub mod pantry_items;
pub mod system;

/// Explicit route table: one collection route, one item route, plus health.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(pantry_items::router())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use pantry_core::PantryItemId;
    use pantry_infra::{PantryItemStore, StoreError};
    use pantry_inventory::{PantryItem, PantryItemDraft};

    use super::*;
    use crate::app::errors::SERVER_ERROR_DETAIL;
    use crate::app::{AppServices, build_app};

    fn app() -> Router {
        build_app(Arc::new(AppServices::in_memory()))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        if body.is_some() {
            req = req.header(header::CONTENT_TYPE, "application/json");
        }
        let req = req
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, bytes)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, _) = send(app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_collection_is_an_empty_array() {
        let (status, body) = send(app(), Method::GET, "/pantry-items/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
    }

    #[tokio::test]
    async fn non_integer_ids_are_not_found_with_empty_body() {
        for uri in ["/pantry-items/abc/", "/pantry-items/-1/", "/pantry-items/1.5/"] {
            let (status, body) = send(app(), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body.is_empty(), "{uri}");
        }
    }

    #[tokio::test]
    async fn unsupported_methods_are_rejected() {
        let (status, _) = send(app(), Method::DELETE, "/pantry-items/", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = send(app(), Method::POST, "/pantry-items/1/", Some("{}")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (status, body) = send(app(), Method::POST, "/pantry-items/", Some("{\"name\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error - "));
    }

    #[tokio::test]
    async fn missing_content_type_is_unsupported_media_type() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/pantry-items/")
            .body(Body::from("{}"))
            .unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn non_object_payload_is_a_validation_error() {
        let (status, body) = send(app(), Method::POST, "/pantry-items/", Some("[1, 2]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({ "non_field_errors": ["Invalid data. Expected a dictionary, but got list."] })
        );
    }

    #[tokio::test]
    async fn put_to_unknown_id_is_not_found_before_validation() {
        let (status, body) = send(app(), Method::PUT, "/pantry-items/77/", Some("{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    /// Every call fails the way a broken database would.
    struct FailingStore;

    impl FailingStore {
        fn fail<T>(operation: &'static str) -> Result<T, StoreError> {
            Err(StoreError::CorruptRow {
                operation,
                message: "column \"quantity\" is not a float8".to_string(),
            })
        }
    }

    #[async_trait]
    impl PantryItemStore for FailingStore {
        async fn list(&self) -> Result<Vec<PantryItem>, StoreError> {
            Self::fail("list")
        }

        async fn create(&self, _draft: PantryItemDraft) -> Result<PantryItem, StoreError> {
            Self::fail("create")
        }

        async fn get(&self, _id: PantryItemId) -> Result<PantryItem, StoreError> {
            Self::fail("get")
        }

        async fn replace(
            &self,
            _id: PantryItemId,
            _draft: PantryItemDraft,
        ) -> Result<PantryItem, StoreError> {
            Self::fail("replace")
        }

        async fn delete(&self, _id: PantryItemId) -> Result<(), StoreError> {
            Self::fail("delete")
        }
    }

    #[tokio::test]
    async fn store_failures_are_generic_server_errors() {
        let app = build_app(Arc::new(AppServices::new(Arc::new(FailingStore))));
        let payload = r#"{"name": "Rice", "category": "Dry", "quantity": 1, "unit": "kg"}"#;

        for (method, uri, body) in [
            (Method::GET, "/pantry-items/", None),
            (Method::POST, "/pantry-items/", Some(payload)),
            (Method::GET, "/pantry-items/1/", None),
            (Method::PUT, "/pantry-items/1/", Some(payload)),
            (Method::DELETE, "/pantry-items/1/", None),
        ] {
            let (status, bytes) = send(app.clone(), method.clone(), uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(
                serde_json::from_slice::<Value>(&bytes).unwrap(),
                json!({ "detail": SERVER_ERROR_DETAIL }),
                "{method} {uri}"
            );
            assert!(!String::from_utf8_lossy(&bytes).contains("quantity"));
        }
    }
}
