//! Country repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide search/get/create/update over the `country` table.
//!
//! # Invariants
//! - `continent_id` is written as given; storage enforces the reference.
//! - Search results are ordered by `country_id`.

use super::filter::SearchFilter;
use super::{RepoError, RepoResult};
use crate::model::country::{Country, CountryId};
use crate::model::EntityKind;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const COUNTRY_SELECT_SQL: &str = "SELECT
    country_id,
    country_code,
    name,
    continent_id,
    wikipedia_link,
    keywords
FROM country";

/// Optional country search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySearch {
    pub country_code: Option<String>,
    pub name: Option<String>,
}

/// Repository interface for country persistence.
pub trait CountryRepository {
    fn search_countries(&self, query: &CountrySearch) -> RepoResult<Vec<Country>>;
    fn get_country(&self, id: CountryId) -> RepoResult<Option<Country>>;
    fn create_country(&self, country: &Country) -> RepoResult<CountryId>;
    fn update_country(&self, country: &Country) -> RepoResult<CountryId>;
}

/// SQLite-backed country repository.
pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn search_countries(&self, query: &CountrySearch) -> RepoResult<Vec<Country>> {
        let mut filter = SearchFilter::new(COUNTRY_SELECT_SQL);
        filter
            .exact("country_code", query.country_code.as_deref())
            .contains("name", query.name.as_deref());
        let (sql, bind_values) = filter.finish("country_id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut countries = Vec::new();

        while let Some(row) = rows.next()? {
            countries.push(parse_country_row(row)?);
        }

        Ok(countries)
    }

    fn get_country(&self, id: CountryId) -> RepoResult<Option<Country>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COUNTRY_SELECT_SQL} WHERE country_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_country_row(row)?));
        }

        Ok(None)
    }

    fn create_country(&self, country: &Country) -> RepoResult<CountryId> {
        country.validate_new()?;

        self.conn.execute(
            "INSERT INTO country (
                country_code,
                name,
                continent_id,
                wikipedia_link,
                keywords
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                country.country_code.as_str(),
                country.name.as_str(),
                country.continent_id,
                country.wikipedia_link.as_deref(),
                country.keywords.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_country(&self, country: &Country) -> RepoResult<CountryId> {
        let id = country.validate_existing()?;

        let changed = self.conn.execute(
            "UPDATE country
             SET
                country_code = ?1,
                name = ?2,
                continent_id = ?3,
                wikipedia_link = ?4,
                keywords = ?5
             WHERE country_id = ?6;",
            params![
                country.country_code.as_str(),
                country.name.as_str(),
                country.continent_id,
                country.wikipedia_link.as_deref(),
                country.keywords.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Country,
                id,
            });
        }

        Ok(id)
    }
}

fn parse_country_row(row: &Row<'_>) -> RepoResult<Country> {
    Ok(Country {
        country_id: Some(row.get("country_id")?),
        country_code: row.get("country_code")?,
        name: row.get("name")?,
        continent_id: row.get("continent_id")?,
        wikipedia_link: row.get("wikipedia_link")?,
        keywords: row.get("keywords")?,
    })
}
