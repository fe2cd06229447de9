//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a pantry item.
///
/// Assigned by the store at creation (positive, never reused).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PantryItemId(i64);

impl PantryItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for PantryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for PantryItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PantryItemId> for i64 {
    fn from(value: PantryItemId) -> Self {
        value.0
    }
}

/// Parses a path segment: ASCII digits only (no sign, no whitespace).
impl FromStr for PantryItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_id(format!("PantryItemId: {s:?} is not an integer")));
        }
        let value = s
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("PantryItemId: {e}")))?;
        Ok(Self(value))
    }
}
