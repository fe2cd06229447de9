//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the shared handle handlers use
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request body / path parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use pantry_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an already-wired set of services.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router()
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}

/// Wire services from configuration, then build the router (used by `main.rs`).
pub async fn build_app_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(&config.store).await?;
    Ok(build_app(Arc::new(services)))
}

pub use services::AppServices;
