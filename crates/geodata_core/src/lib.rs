//! Core engine for geographic reference data.
//! Translates request events into SQLite operations and answers with
//! response events; callers never see SQL or connection state.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, OpenOptions};
pub use engine::{Request, RequestProcessor, Response};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::continent::{Continent, ContinentId};
pub use model::country::{Country, CountryId};
pub use model::region::{Region, RegionId};
pub use model::{EntityKind, ValidationError};
pub use repo::continent_repo::{ContinentRepository, ContinentSearch, SqliteContinentRepository};
pub use repo::country_repo::{CountryRepository, CountrySearch, SqliteCountryRepository};
pub use repo::region_repo::{RegionRepository, RegionSearch, SqliteRegionRepository};
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
