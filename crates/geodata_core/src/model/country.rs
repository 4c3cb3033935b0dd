//! Country record.

use super::continent::ContinentId;
use super::{require_assigned, require_unassigned, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned country key.
pub type CountryId = i64;

/// Country row from the `country` table.
///
/// `continent_id` is not checked by core; storage enforces the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: Option<CountryId>,
    pub country_code: String,
    pub name: String,
    pub continent_id: ContinentId,
    pub wikipedia_link: Option<String>,
    pub keywords: Option<String>,
}

impl Country {
    /// Creates an unsaved country with no link or keywords.
    pub fn new(
        country_code: impl Into<String>,
        name: impl Into<String>,
        continent_id: ContinentId,
    ) -> Self {
        Self {
            country_id: None,
            country_code: country_code.into(),
            name: name.into(),
            continent_id,
            wikipedia_link: None,
            keywords: None,
        }
    }

    pub fn validate_new(&self) -> Result<(), ValidationError> {
        require_unassigned(EntityKind::Country, self.country_id)
    }

    pub fn validate_existing(&self) -> Result<CountryId, ValidationError> {
        require_assigned(EntityKind::Country, self.country_id)
    }
}
