use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{Entity, PantryItemId};

pub const NAME_MAX_LEN: usize = 200;
pub const CATEGORY_MAX_LEN: usize = 100;
pub const UNIT_MAX_LEN: usize = 20;
pub const NOTES_MAX_LEN: usize = 1000;

/// A persisted pantry item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: PantryItemId,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub par_level: f64,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PantryItem {
    /// Materialize a new record from a validated draft.
    pub fn from_draft(id: PantryItemId, draft: PantryItemDraft, now: DateTime<Utc>) -> Self {
        let PantryItemDraft {
            name,
            category,
            quantity,
            unit,
            par_level,
            expiry_date,
            notes,
        } = draft;

        Self {
            id,
            name,
            category,
            quantity,
            unit,
            par_level,
            expiry_date,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every writable field; `id` and `created_at` are kept.
    pub fn apply_draft(&mut self, draft: PantryItemDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.category = draft.category;
        self.quantity = draft.quantity;
        self.unit = draft.unit;
        self.par_level = draft.par_level;
        self.expiry_date = draft.expiry_date;
        self.notes = draft.notes;
        self.updated_at = now;
    }

    /// The writable fields of this record, as a draft.
    pub fn to_draft(&self) -> PantryItemDraft {
        PantryItemDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            par_level: self.par_level,
            expiry_date: self.expiry_date,
            notes: self.notes.clone(),
        }
    }
}

impl Entity for PantryItem {
    type Id = PantryItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validated writable fields of a pantry item, ready to persist.
///
/// Only [`crate::serializer::PantryItemSerializer`] produces these from
/// untrusted input.
#[derive(Debug, Clone, PartialEq)]
pub struct PantryItemDraft {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub par_level: f64,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PantryItemDraft {
        PantryItemDraft {
            name: "Flour".to_string(),
            category: "Dry Goods".to_string(),
            quantity: 2.5,
            unit: "kg".to_string(),
            par_level: 1.0,
            expiry_date: NaiveDate::from_ymd_opt(2030, 1, 31),
            notes: String::new(),
        }
    }

    #[test]
    fn from_draft_sets_both_timestamps() {
        let now = Utc::now();
        let item = PantryItem::from_draft(PantryItemId::new(1), draft(), now);
        assert_eq!(item.created_at, now);
        assert_eq!(item.updated_at, now);
        assert_eq!(item.to_draft(), draft());
    }

    #[test]
    fn apply_draft_keeps_identity_and_creation_time() {
        let created = Utc::now();
        let mut item = PantryItem::from_draft(PantryItemId::new(9), draft(), created);

        let later = created + chrono::Duration::seconds(5);
        let mut next = draft();
        next.name = "Rye flour".to_string();
        next.expiry_date = None;
        item.apply_draft(next.clone(), later);

        assert_eq!(item.id, PantryItemId::new(9));
        assert_eq!(item.created_at, created);
        assert_eq!(item.updated_at, later);
        assert_eq!(item.to_draft(), next);
    }

    #[test]
    fn representation_has_every_field() {
        let item = PantryItem::from_draft(PantryItemId::new(3), draft(), Utc::now());
        let json = serde_json::to_value(&item).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort_unstable();
        let mut expected = vec![
            "id", "name", "category", "quantity", "unit", "par_level", "expiry_date", "notes",
            "created_at", "updated_at",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(json["expiry_date"], "2030-01-31");
    }
}
