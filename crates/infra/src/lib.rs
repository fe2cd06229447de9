//! Infrastructure layer: configuration, database wiring and item storage.

pub mod config;
pub mod db;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use store::{InMemoryPantryItemStore, PantryItemStore, PostgresPantryItemStore, StoreError};
