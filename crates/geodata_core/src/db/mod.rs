//! SQLite storage bootstrap and schema checks.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the geodata engine.
//! - Confirm the reference-data tables exist before handing out a connection.
//!
//! # Invariants
//! - Returned connections have passed `schema::verify_schema`.
//! - Schema creation only happens when explicitly requested.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, OpenOptions};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Caller supplied a blank storage location.
    EmptyPath,
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::EmptyPath => write!(f, "database path cannot be empty"),
            Self::MissingRequiredTable(table) => {
                write!(f, "database is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "database table `{table}` is missing required column `{column}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyPath => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
