//! Request events issued by the presentation layer.

use crate::model::continent::{Continent, ContinentId};
use crate::model::country::{Country, CountryId};
use crate::model::region::{Region, RegionId};
use crate::repo::continent_repo::ContinentSearch;
use crate::repo::country_repo::CountrySearch;
use crate::repo::region_repo::RegionSearch;
use serde::{Deserialize, Serialize};

/// Closed set of operations the engine understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// `path` is an opaque storage location handed to SQLite.
    OpenDatabase { path: String },
    CloseDatabase,

    StartContinentSearch(ContinentSearch),
    LoadContinent { continent_id: ContinentId },
    SaveNewContinent(Continent),
    SaveContinent(Continent),

    StartCountrySearch(CountrySearch),
    LoadCountry { country_id: CountryId },
    SaveNewCountry(Country),
    SaveCountry(Country),

    StartRegionSearch(RegionSearch),
    LoadRegion { region_id: RegionId },
    SaveNewRegion(Region),
    SaveRegion(Region),
}

impl Request {
    /// Stable snake_case name used in log events.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::OpenDatabase { .. } => "open_database",
            Self::CloseDatabase => "close_database",
            Self::StartContinentSearch(_) => "start_continent_search",
            Self::LoadContinent { .. } => "load_continent",
            Self::SaveNewContinent(_) => "save_new_continent",
            Self::SaveContinent(_) => "save_continent",
            Self::StartCountrySearch(_) => "start_country_search",
            Self::LoadCountry { .. } => "load_country",
            Self::SaveNewCountry(_) => "save_new_country",
            Self::SaveCountry(_) => "save_country",
            Self::StartRegionSearch(_) => "start_region_search",
            Self::LoadRegion { .. } => "load_region",
            Self::SaveNewRegion(_) => "save_new_region",
            Self::SaveRegion(_) => "save_region",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Request;
    use crate::repo::region_repo::RegionSearch;

    #[test]
    fn kind_name_matches_serde_tag() {
        let request = Request::StartRegionSearch(RegionSearch {
            local_code: Some("CA".to_string()),
            ..RegionSearch::default()
        });
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], request.kind_name());
        assert_eq!(json["local_code"], "CA");
    }
}
