//! Region record.
//!
//! # Invariants
//! - `continent_id` and `country_id` are stored as given; referential
//!   integrity belongs to storage.

use super::continent::ContinentId;
use super::country::CountryId;
use super::{require_assigned, require_unassigned, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned region key.
pub type RegionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: Option<RegionId>,
    /// Globally unique code, e.g. `US-CA`.
    pub region_code: String,
    /// Code used within the owning country, e.g. `CA`.
    pub local_code: String,
    pub name: String,
    pub continent_id: ContinentId,
    pub country_id: CountryId,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

impl Region {
    /// Creates an unsaved region with no link or keywords.
    pub fn new(
        region_code: impl Into<String>,
        local_code: impl Into<String>,
        name: impl Into<String>,
        continent_id: ContinentId,
        country_id: CountryId,
    ) -> Self {
        Self {
            region_id: None,
            region_code: region_code.into(),
            local_code: local_code.into(),
            name: name.into(),
            continent_id,
            country_id,
            wikipedia_link: None,
            keywords: None,
        }
    }

    pub fn validate_new(&self) -> Result<(), ValidationError> {
        require_unassigned(EntityKind::Region, self.region_id)
    }

    pub fn validate_existing(&self) -> Result<RegionId, ValidationError> {
        require_assigned(EntityKind::Region, self.region_id)
    }
}
