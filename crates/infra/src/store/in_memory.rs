use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use pantry_core::{Entity, PantryItemId};
use pantry_inventory::{PantryItem, PantryItemDraft};

use super::{PantryItemStore, StoreError};

#[derive(Debug)]
struct Inner {
    items: BTreeMap<PantryItemId, PantryItem>,
    /// Last id handed out; ids are never reused, even after delete.
    last_id: i64,
}

/// In-memory pantry item store for tests/dev.
#[derive(Debug)]
pub struct InMemoryPantryItemStore {
    inner: RwLock<Inner>,
}

impl InMemoryPantryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPantryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PantryItemStore for InMemoryPantryItemStore {
    async fn list(&self) -> Result<Vec<PantryItem>, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.items.values().cloned().collect())
    }

    async fn create(&self, draft: PantryItemDraft) -> Result<PantryItem, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.last_id += 1;
        let item = PantryItem::from_draft(PantryItemId::new(inner.last_id), draft, Utc::now());
        inner.items.insert(item.id(), item.clone());
        Ok(item)
    }

    async fn get(&self, id: PantryItemId) -> Result<PantryItem, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.items.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn replace(
        &self,
        id: PantryItemId,
        draft: PantryItemDraft,
    ) -> Result<PantryItem, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let item = inner.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.apply_draft(draft, Utc::now());
        Ok(item.clone())
    }

    async fn delete(&self, id: PantryItemId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
