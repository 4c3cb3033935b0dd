//! Continent repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide search/get/create/update over the `continents` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `create_continent` never binds a caller-supplied key.
//! - Search results are ordered by `continent_id`.

use super::filter::SearchFilter;
use super::{RepoError, RepoResult};
use crate::model::continent::{Continent, ContinentId};
use crate::model::EntityKind;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const CONTINENT_SELECT_SQL: &str = "SELECT
    continent_id,
    continent_code,
    name
FROM continents";

/// Optional continent search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentSearch {
    /// Exact match.
    pub continent_code: Option<String>,
    /// Case-sensitive substring match.
    pub name: Option<String>,
}

/// Repository interface for continent persistence.
pub trait ContinentRepository {
    fn search_continents(&self, query: &ContinentSearch) -> RepoResult<Vec<Continent>>;
    fn get_continent(&self, id: ContinentId) -> RepoResult<Option<Continent>>;
    fn create_continent(&self, continent: &Continent) -> RepoResult<ContinentId>;
    fn update_continent(&self, continent: &Continent) -> RepoResult<ContinentId>;
}

/// SQLite-backed continent repository.
pub struct SqliteContinentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContinentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContinentRepository for SqliteContinentRepository<'_> {
    fn search_continents(&self, query: &ContinentSearch) -> RepoResult<Vec<Continent>> {
        let mut filter = SearchFilter::new(CONTINENT_SELECT_SQL);
        filter
            .exact("continent_code", query.continent_code.as_deref())
            .contains("name", query.name.as_deref());
        let (sql, bind_values) = filter.finish("continent_id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut continents = Vec::new();

        while let Some(row) = rows.next()? {
            continents.push(parse_continent_row(row)?);
        }

        Ok(continents)
    }

    fn get_continent(&self, id: ContinentId) -> RepoResult<Option<Continent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTINENT_SELECT_SQL} WHERE continent_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_continent_row(row)?));
        }

        Ok(None)
    }

    fn create_continent(&self, continent: &Continent) -> RepoResult<ContinentId> {
        continent.validate_new()?;

        self.conn.execute(
            "INSERT INTO continents (continent_code, name) VALUES (?1, ?2);",
            params![continent.continent_code.as_str(), continent.name.as_str()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_continent(&self, continent: &Continent) -> RepoResult<ContinentId> {
        let id = continent.validate_existing()?;

        let changed = self.conn.execute(
            "UPDATE continents
             SET
                continent_code = ?1,
                name = ?2
             WHERE continent_id = ?3;",
            params![continent.continent_code.as_str(), continent.name.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Continent,
                id,
            });
        }

        Ok(id)
    }
}

fn parse_continent_row(row: &Row<'_>) -> RepoResult<Continent> {
    Ok(Continent {
        continent_id: Some(row.get("continent_id")?),
        continent_code: row.get("continent_code")?,
        name: row.get("name")?,
    })
}
