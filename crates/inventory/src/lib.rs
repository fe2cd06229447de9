//! Pantry inventory domain: the pantry item record and its serializer.
//!
//! Pure domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod serializer;

pub use item::{PantryItem, PantryItemDraft};
pub use serializer::PantryItemSerializer;
