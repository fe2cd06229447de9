use std::sync::Arc;

use anyhow::Context;

use pantry_infra::config::StoreConfig;
use pantry_infra::{InMemoryPantryItemStore, PantryItemStore, PostgresPantryItemStore, db};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn PantryItemStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn PantryItemStore>) -> Self {
        Self { store }
    }

    /// Fresh in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPantryItemStore::new()))
    }

    pub fn store(&self) -> &dyn PantryItemStore {
        self.store.as_ref()
    }
}

pub async fn build_services(config: &StoreConfig) -> anyhow::Result<AppServices> {
    match config {
        StoreConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES is not enabled; data lives in memory only");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::connect(database_url, *max_connections)
                .await
                .context("failed to connect to Postgres")?;
            db::migrate(&pool)
                .await
                .context("failed to apply database schema")?;
            tracing::info!(max_connections, "using Postgres pantry item store");
            Ok(AppServices::new(Arc::new(PostgresPantryItemStore::new(pool))))
        }
    }
}
