//! Response events returned to the presentation layer.
//!
//! Save confirmation differs by entity: continents answer with
//! `ContinentSaved`, while countries and regions answer with the reloaded
//! record as `CountryLoaded` / `RegionLoaded`. Callers treat a loaded event
//! following a save request as the saved signal.

use crate::model::continent::Continent;
use crate::model::country::Country;
use crate::model::region::Region;
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    DatabaseOpened { path: String },
    DatabaseOpenFailed { message: String },
    DatabaseClosed,
    /// A search/load/save request arrived while no database was open.
    NoDatabaseOpen,

    ContinentSearchResult(Continent),
    ContinentLoaded(Continent),
    ContinentSaved(Continent),
    SaveContinentFailed { message: String },

    CountrySearchResult(Country),
    CountryLoaded(Country),
    SaveCountryFailed { message: String },

    RegionSearchResult(Region),
    RegionLoaded(Region),
    SaveRegionFailed { message: String },

    /// Not-found loads and failed searches.
    Error { message: String },
}

impl Response {
    /// Entity-specific save failure.
    pub fn save_failed(entity: EntityKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match entity {
            EntityKind::Continent => Self::SaveContinentFailed { message },
            EntityKind::Country => Self::SaveCountryFailed { message },
            EntityKind::Region => Self::SaveRegionFailed { message },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether this response reports a failed request.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpenFailed { .. }
                | Self::NoDatabaseOpen
                | Self::SaveContinentFailed { .. }
                | Self::SaveCountryFailed { .. }
                | Self::SaveRegionFailed { .. }
                | Self::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Response;
    use crate::model::EntityKind;

    #[test]
    fn save_failed_picks_entity_variant() {
        assert_eq!(
            Response::save_failed(EntityKind::Country, "boom"),
            Response::SaveCountryFailed {
                message: "boom".to_string()
            }
        );
        assert!(Response::save_failed(EntityKind::Region, "boom").is_failure());
        assert!(!Response::DatabaseClosed.is_failure());
    }

    #[test]
    fn unit_variants_serialize_as_bare_tag() {
        let json = serde_json::to_string(&Response::NoDatabaseOpen).unwrap();
        assert_eq!(json, r#"{"type":"no_database_open"}"#);
    }
}
