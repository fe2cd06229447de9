//! Pantry item storage boundary.
//!
//! Handlers only see [`PantryItemStore`]; the backing engine is picked at
//! startup (in-memory for dev/test, Postgres otherwise).

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use pantry_core::PantryItemId;
use pantry_inventory::{PantryItem, PantryItemDraft};

pub use in_memory::InMemoryPantryItemStore;
pub use postgres::PostgresPantryItemStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id.
    #[error("pantry item {0} not found")]
    NotFound(PantryItemId),

    /// The backing database failed.
    #[error("database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A stored row could not be mapped back to a record.
    #[error("corrupt row in {operation}: {message}")]
    CorruptRow {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// CRUD over pantry items. Every method is atomic for the single record it
/// touches.
#[async_trait]
pub trait PantryItemStore: Send + Sync {
    /// All records, ascending by id.
    async fn list(&self) -> Result<Vec<PantryItem>, StoreError>;

    /// Persist a new record and return it with its assigned id.
    async fn create(&self, draft: PantryItemDraft) -> Result<PantryItem, StoreError>;

    async fn get(&self, id: PantryItemId) -> Result<PantryItem, StoreError>;

    /// Overwrite every writable field of an existing record.
    async fn replace(&self, id: PantryItemId, draft: PantryItemDraft)
        -> Result<PantryItem, StoreError>;

    async fn delete(&self, id: PantryItemId) -> Result<(), StoreError>;
}
