//! Reference-data schema: bundled DDL and shape verification.
//!
//! # Responsibility
//! - Ship the table layout the repositories read and write.
//! - Verify that an opened database carries every required table/column.
//!
//! # Invariants
//! - `apply_schema` is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - `REQUIRED_TABLES` lists exactly the columns the repositories select.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("0001_reference_data.sql");

/// A table and the columns core reads from it.
#[derive(Debug, Clone, Copy)]
pub struct RequiredTable {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const REQUIRED_TABLES: &[RequiredTable] = &[
    RequiredTable {
        name: "continents",
        columns: &["continent_id", "continent_code", "name"],
    },
    RequiredTable {
        name: "country",
        columns: &[
            "country_id",
            "country_code",
            "name",
            "continent_id",
            "wikipedia_link",
            "keywords",
        ],
    },
    RequiredTable {
        name: "regions",
        columns: &[
            "region_id",
            "region_code",
            "local_code",
            "name",
            "continent_id",
            "country_id",
            "wikipedia_link",
            "keywords",
        ],
    },
];

/// Creates any missing reference-data tables.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Checks that every table and column in [`REQUIRED_TABLES`] exists.
///
/// Also the first statement that reads the file, so a non-database file
/// fails here with a SQLite error.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table.name)? {
            return Err(DbError::MissingRequiredTable(table.name));
        }

        let present = table_columns(conn, table.name)?;
        if let Some(missing) = table
            .columns
            .iter()
            .find(|column| !present.iter().any(|name| name == *column))
        {
            return Err(DbError::MissingRequiredColumn {
                table: table.name,
                column: *missing,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{apply_schema, verify_schema, REQUIRED_TABLES};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn apply_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();
        verify_schema(&conn).unwrap();
    }

    #[test]
    fn verify_schema_reports_first_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::MissingRequiredTable(name) if name == REQUIRED_TABLES[0].name
        ));
    }

    #[test]
    fn verify_schema_reports_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn.execute_batch(
            "DROP TABLE regions;
             CREATE TABLE regions (
                region_id INTEGER PRIMARY KEY,
                region_code TEXT NOT NULL,
                name TEXT NOT NULL
             );",
        )
        .unwrap();

        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(
            err,
            DbError::MissingRequiredColumn {
                table: "regions",
                column: "local_code"
            }
        ));
    }
}
