//! Region repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide search/get/create/update over the `regions` table.
//!
//! # Invariants
//! - `continent_id` / `country_id` are written as given.
//! - Search results are ordered by `region_id`.

use super::filter::SearchFilter;
use super::{RepoError, RepoResult};
use crate::model::region::{Region, RegionId};
use crate::model::EntityKind;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const REGION_SELECT_SQL: &str = "SELECT
    region_id,
    region_code,
    local_code,
    name,
    continent_id,
    country_id,
    wikipedia_link,
    keywords
FROM regions";

/// Optional region search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSearch {
    /// Exact match.
    pub region_code: Option<String>,
    /// Exact match.
    pub local_code: Option<String>,
    /// Case-sensitive substring match.
    pub name: Option<String>,
}

/// Repository interface for region persistence.
pub trait RegionRepository {
    fn search_regions(&self, query: &RegionSearch) -> RepoResult<Vec<Region>>;
    fn get_region(&self, id: RegionId) -> RepoResult<Option<Region>>;
    fn create_region(&self, region: &Region) -> RepoResult<RegionId>;
    fn update_region(&self, region: &Region) -> RepoResult<RegionId>;
}

/// SQLite-backed region repository.
pub struct SqliteRegionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RegionRepository for SqliteRegionRepository<'_> {
    fn search_regions(&self, query: &RegionSearch) -> RepoResult<Vec<Region>> {
        let mut filter = SearchFilter::new(REGION_SELECT_SQL);
        filter
            .exact("region_code", query.region_code.as_deref())
            .exact("local_code", query.local_code.as_deref())
            .contains("name", query.name.as_deref());
        let (sql, bind_values) = filter.finish("region_id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut regions = Vec::new();

        while let Some(row) = rows.next()? {
            regions.push(parse_region_row(row)?);
        }

        Ok(regions)
    }

    fn get_region(&self, id: RegionId) -> RepoResult<Option<Region>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REGION_SELECT_SQL} WHERE region_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_region_row(row)?));
        }

        Ok(None)
    }

    fn create_region(&self, region: &Region) -> RepoResult<RegionId> {
        region.validate_new()?;

        self.conn.execute(
            "INSERT INTO regions (
                region_code,
                local_code,
                name,
                continent_id,
                country_id,
                wikipedia_link,
                keywords
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                region.region_code.as_str(),
                region.local_code.as_str(),
                region.name.as_str(),
                region.continent_id,
                region.country_id,
                region.wikipedia_link.as_deref(),
                region.keywords.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_region(&self, region: &Region) -> RepoResult<RegionId> {
        let id = region.validate_existing()?;

        let changed = self.conn.execute(
            "UPDATE regions
             SET
                region_code = ?1,
                local_code = ?2,
                name = ?3,
                continent_id = ?4,
                country_id = ?5,
                wikipedia_link = ?6,
                keywords = ?7
             WHERE region_id = ?8;",
            params![
                region.region_code.as_str(),
                region.local_code.as_str(),
                region.name.as_str(),
                region.continent_id,
                region.country_id,
                region.wikipedia_link.as_deref(),
                region.keywords.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Region,
                id,
            });
        }

        Ok(id)
    }
}

fn parse_region_row(row: &Row<'_>) -> RepoResult<Region> {
    Ok(Region {
        region_id: Some(row.get("region_id")?),
        region_code: row.get("region_code")?,
        local_code: row.get("local_code")?,
        name: row.get("name")?,
        continent_id: row.get("continent_id")?,
        country_id: row.get("country_id")?,
        wikipedia_link: row.get("wikipedia_link")?,
        keywords: row.get("keywords")?,
    })
}
