//! Geographic reference-data model.
//!
//! # Responsibility
//! - Define the continent/country/region records exchanged with callers.
//! - Provide the write-path validation shared by all three entities.
//!
//! # Invariants
//! - A record read from storage always carries `Some(id)`.
//! - Save-new records carry no id; save-existing records carry one.

pub mod continent;
pub mod country;
pub mod region;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The three entity families served by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Continent,
    Country,
    Region,
}

impl EntityKind {
    /// Lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continent => "continent",
            Self::Country => "country",
            Self::Region => "region",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Continent => "Continent",
            Self::Country => "Country",
            Self::Region => "Region",
        };
        f.write_str(label)
    }
}

/// Write-path validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Save-new received a record whose key was already assigned.
    IdAssignedBeforeInsert { entity: EntityKind, id: i64 },
    /// Save-existing received a record with no key.
    MissingId { entity: EntityKind },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdAssignedBeforeInsert { entity, id } => write!(
                f,
                "new {} must not carry an ID (got {id})",
                entity.as_str()
            ),
            Self::MissingId { entity } => {
                write!(f, "{entity} cannot be updated without an ID")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_unassigned(entity: EntityKind, id: Option<i64>) -> Result<(), ValidationError> {
    match id {
        Some(id) => Err(ValidationError::IdAssignedBeforeInsert { entity, id }),
        None => Ok(()),
    }
}

pub(crate) fn require_assigned(entity: EntityKind, id: Option<i64>) -> Result<i64, ValidationError> {
    id.ok_or(ValidationError::MissingId { entity })
}
