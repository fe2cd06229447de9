//! Postgres-backed pantry item store.
//!
//! Every operation is a single statement, so each one is atomic on its own
//! and concurrent writers to the same row resolve as last-writer-wins under
//! the database's default isolation.
//!
//! Timestamps are assigned by the database (`NOW()`) and read back through
//! `RETURNING`, so the representation returned by a write is exactly what a
//! later read sees.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use pantry_core::PantryItemId;
use pantry_inventory::{PantryItem, PantryItemDraft};

use super::{PantryItemStore, StoreError};

const COLUMNS: &str =
    "id, name, category, quantity, unit, par_level, expiry_date, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PostgresPantryItemStore {
    pool: PgPool,
}

impl PostgresPantryItemStore {
    /// The schema must already exist; see [`crate::db::migrate`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PantryItemStore for PostgresPantryItemStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<PantryItem>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM pantry_items ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(decode_row("list", row)?);
        }
        tracing::debug!(count = items.len(), "listed pantry items");
        Ok(items)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name), err)]
    async fn create(&self, draft: PantryItemDraft) -> Result<PantryItem, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO pantry_items (
                name,
                category,
                quantity,
                unit,
                par_level,
                expiry_date,
                notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.par_level)
        .bind(draft.expiry_date)
        .bind(&draft.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        decode_row("create", &row)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn get(&self, id: PantryItemId) -> Result<PantryItem, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM pantry_items WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?
            .ok_or(StoreError::NotFound(id))?;

        decode_row("get", &row)
    }

    #[instrument(skip(self, draft), fields(id = %id), err)]
    async fn replace(
        &self,
        id: PantryItemId,
        draft: PantryItemDraft,
    ) -> Result<PantryItem, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE pantry_items SET
                name = $2,
                category = $3,
                quantity = $4,
                unit = $5,
                par_level = $6,
                expiry_date = $7,
                notes = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.par_level)
        .bind(draft.expiry_date)
        .bind(&draft.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace", e))?
        .ok_or(StoreError::NotFound(id))?;

        decode_row("replace", &row)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: PantryItemId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM pantry_items WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    StoreError::Database {
        operation,
        source: err,
    }
}

fn decode_row(operation: &'static str, row: &sqlx::postgres::PgRow) -> Result<PantryItem, StoreError> {
    PantryItemRow::from_row(row)
        .map(Into::into)
        .map_err(|e| StoreError::CorruptRow {
            operation,
            message: e.to_string(),
        })
}

// SQLx row types

#[derive(Debug)]
struct PantryItemRow {
    id: i64,
    name: String,
    category: String,
    quantity: f64,
    unit: String,
    par_level: f64,
    expiry_date: Option<NaiveDate>,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for PantryItemRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(PantryItemRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            quantity: row.try_get("quantity")?,
            unit: row.try_get("unit")?,
            par_level: row.try_get("par_level")?,
            expiry_date: row.try_get("expiry_date")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl From<PantryItemRow> for PantryItem {
    fn from(row: PantryItemRow) -> Self {
        PantryItem {
            id: PantryItemId::new(row.id),
            name: row.name,
            category: row.category,
            quantity: row.quantity,
            unit: row.unit,
            par_level: row.par_level,
            expiry_date: row.expiry_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Runs only when `DATABASE_URL` points at a disposable Postgres database.
#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> Option<PostgresPantryItemStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = crate::db::connect(&url, 2).await.expect("connect to DATABASE_URL");
        crate::db::migrate(&pool).await.expect("apply migrations");
        Some(PostgresPantryItemStore::new(pool))
    }

    fn draft(name: &str) -> PantryItemDraft {
        PantryItemDraft {
            name: name.to_string(),
            category: "Dairy".to_string(),
            quantity: 2.0,
            unit: "l".to_string(),
            par_level: 1.0,
            expiry_date: NaiveDate::from_ymd_opt(2030, 5, 1),
            notes: "fridge".to_string(),
        }
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let Some(store) = store().await else {
            eprintln!("DATABASE_URL not set; skipping postgres store test");
            return;
        };

        let created = store.create(draft("Milk")).await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), created);
        assert!(store.list().await.unwrap().iter().any(|i| i.id == created.id));

        let mut next = draft("Oat milk");
        next.expiry_date = None;
        let replaced = store.replace(created.id, next.clone()).await.unwrap();
        assert_eq!(replaced.to_draft(), next);
        assert_eq!(replaced.created_at, created.created_at);

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap_err().is_not_found());
        assert!(store.delete(created.id).await.unwrap_err().is_not_found());
        assert!(store.replace(created.id, next).await.unwrap_err().is_not_found());
    }
}
