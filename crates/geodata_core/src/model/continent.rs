//! Continent record.

use super::{require_assigned, require_unassigned, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned continent key.
pub type ContinentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    /// `None` until storage assigns a key.
    pub continent_id: Option<ContinentId>,
    pub continent_code: String,
    pub name: String,
}

impl Continent {
    /// Creates an unsaved continent.
    pub fn new(continent_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            continent_id: None,
            continent_code: continent_code.into(),
            name: name.into(),
        }
    }

    /// Checks this record may be inserted as a new row.
    pub fn validate_new(&self) -> Result<(), ValidationError> {
        require_unassigned(EntityKind::Continent, self.continent_id)
    }

    /// Checks this record may update an existing row; returns its key.
    pub fn validate_existing(&self) -> Result<ContinentId, ValidationError> {
        require_assigned(EntityKind::Continent, self.continent_id)
    }
}
