//! Request dispatch and per-operation handlers.
//!
//! # Responsibility
//! - Route each request kind to exactly one handler.
//! - Translate repository results and errors into response events.
//!
//! # Invariants
//! - At most one live connection per processor.
//! - A failed open never replaces the current connection.
//! - Storage errors never escape `process`; they become responses.

use super::request::Request;
use super::response::Response;
use crate::db::{open_db, OpenOptions};
use crate::model::continent::{Continent, ContinentId};
use crate::model::country::{Country, CountryId};
use crate::model::region::{Region, RegionId};
use crate::model::EntityKind;
use crate::repo::continent_repo::{ContinentRepository, ContinentSearch, SqliteContinentRepository};
use crate::repo::country_repo::{CountryRepository, CountrySearch, SqliteCountryRepository};
use crate::repo::region_repo::{RegionRepository, RegionSearch, SqliteRegionRepository};
use crate::repo::RepoError;
use log::{debug, info, warn};
use rusqlite::Connection;
use std::time::Instant;

/// Owns the connection and answers requests one at a time.
///
/// `process` takes `&mut self`, so a processor cannot serve two requests at
/// once. Independent processors hold independent connections.
#[derive(Debug, Default)]
pub struct RequestProcessor {
    connection: Option<Connection>,
    options: OpenOptions,
}

impl RequestProcessor {
    /// Creates a processor with no open database and default open options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a processor that applies `options` to every `OpenDatabase`.
    pub fn with_options(options: OpenOptions) -> Self {
        Self {
            connection: None,
            options,
        }
    }

    /// Creates a processor around an already-open connection.
    ///
    /// The connection is used as-is; callers are responsible for its schema.
    pub fn with_connection(connection: Connection) -> Self {
        Self {
            connection: Some(connection),
            options: OpenOptions::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Handles one request and returns every response it produces, in order.
    pub fn process(&mut self, request: Request) -> Vec<Response> {
        let started_at = Instant::now();
        let kind = request.kind_name();
        debug!("event=request module=engine status=start kind={kind}");

        let responses = self.dispatch(request);

        let failed = responses.iter().any(Response::is_failure);
        info!(
            "event=request module=engine status={} kind={} responses={} duration_ms={}",
            if failed { "failed" } else { "ok" },
            kind,
            responses.len(),
            started_at.elapsed().as_millis()
        );
        responses
    }

    fn dispatch(&mut self, request: Request) -> Vec<Response> {
        match request {
            Request::OpenDatabase { path } => self.open_database(path),
            Request::CloseDatabase => self.close_database(),

            Request::StartContinentSearch(query) => {
                self.with_open(|conn| search_continents(conn, &query))
            }
            Request::LoadContinent { continent_id } => {
                self.with_open(|conn| load_continent(conn, continent_id))
            }
            Request::SaveNewContinent(continent) => {
                self.with_open(|conn| save_new_continent(conn, continent))
            }
            Request::SaveContinent(continent) => {
                self.with_open(|conn| save_continent(conn, continent))
            }

            Request::StartCountrySearch(query) => {
                self.with_open(|conn| search_countries(conn, &query))
            }
            Request::LoadCountry { country_id } => {
                self.with_open(|conn| load_country(conn, country_id))
            }
            Request::SaveNewCountry(country) => {
                self.with_open(|conn| save_new_country(conn, &country))
            }
            Request::SaveCountry(country) => self.with_open(|conn| save_country(conn, &country)),

            Request::StartRegionSearch(query) => {
                self.with_open(|conn| search_regions(conn, &query))
            }
            Request::LoadRegion { region_id } => {
                self.with_open(|conn| load_region(conn, region_id))
            }
            Request::SaveNewRegion(region) => self.with_open(|conn| save_new_region(conn, &region)),
            Request::SaveRegion(region) => self.with_open(|conn| save_region(conn, &region)),
        }
    }

    fn open_database(&mut self, path: String) -> Vec<Response> {
        match open_db(&path, &self.options) {
            Ok(conn) => {
                if let Some(previous) = self.connection.replace(conn) {
                    close_connection(previous, "replace");
                }
                vec![Response::DatabaseOpened { path }]
            }
            Err(err) => vec![Response::DatabaseOpenFailed {
                message: err.to_string(),
            }],
        }
    }

    fn close_database(&mut self) -> Vec<Response> {
        match self.connection.take() {
            Some(conn) => {
                close_connection(conn, "close");
                vec![Response::DatabaseClosed]
            }
            None => {
                debug!("event=db_close module=engine status=skipped reason=not_open");
                Vec::new()
            }
        }
    }

    fn with_open<F>(&self, handler: F) -> Vec<Response>
    where
        F: FnOnce(&Connection) -> Vec<Response>,
    {
        match self.connection.as_ref() {
            Some(conn) => handler(conn),
            None => {
                warn!("event=request_rejected module=engine reason=no_database_open");
                vec![Response::NoDatabaseOpen]
            }
        }
    }
}

/// Closes `conn`; the handle is gone either way, so failures are only logged.
fn close_connection(conn: Connection, reason: &str) {
    match conn.close() {
        Ok(()) => info!("event=db_close module=engine status=ok reason={reason}"),
        Err((_, err)) => warn!(
            "event=db_close module=engine status=error reason={reason} error={err}"
        ),
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Search,
    Load,
    SaveNew,
    Save,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Load => "load",
            Self::SaveNew => "save_new",
            Self::Save => "save",
        }
    }
}

/// Single translation point from repository errors to response events.
///
/// Write failures become `Save<Entity>Failed`; a write that addressed a
/// missing row and every read failure become `Error`.
fn failure(entity: EntityKind, operation: Operation, err: &RepoError) -> Response {
    warn!(
        "event=request_failed module=engine entity={} op={} error={}",
        entity.as_str(),
        operation.as_str(),
        err
    );

    let message = err.to_string();
    match (operation, err) {
        (_, RepoError::NotFound { .. }) => Response::error(message),
        (Operation::SaveNew | Operation::Save, _) => Response::save_failed(entity, message),
        (Operation::Search | Operation::Load, _) => Response::error(message),
    }
}

fn not_found(entity: EntityKind, id: i64) -> Response {
    Response::error(RepoError::NotFound { entity, id }.to_string())
}

fn search_continents(conn: &Connection, query: &ContinentSearch) -> Vec<Response> {
    match SqliteContinentRepository::new(conn).search_continents(query) {
        Ok(continents) => continents
            .into_iter()
            .map(Response::ContinentSearchResult)
            .collect(),
        Err(err) => vec![failure(EntityKind::Continent, Operation::Search, &err)],
    }
}

fn load_continent(conn: &Connection, id: ContinentId) -> Vec<Response> {
    match SqliteContinentRepository::new(conn).get_continent(id) {
        Ok(Some(continent)) => vec![Response::ContinentLoaded(continent)],
        Ok(None) => vec![not_found(EntityKind::Continent, id)],
        Err(err) => vec![failure(EntityKind::Continent, Operation::Load, &err)],
    }
}

fn save_new_continent(conn: &Connection, continent: Continent) -> Vec<Response> {
    match SqliteContinentRepository::new(conn).create_continent(&continent) {
        Ok(id) => vec![Response::ContinentSaved(Continent {
            continent_id: Some(id),
            ..continent
        })],
        Err(err) => vec![failure(EntityKind::Continent, Operation::SaveNew, &err)],
    }
}

fn save_continent(conn: &Connection, continent: Continent) -> Vec<Response> {
    match SqliteContinentRepository::new(conn).update_continent(&continent) {
        Ok(_) => vec![Response::ContinentSaved(continent)],
        Err(err) => vec![failure(EntityKind::Continent, Operation::Save, &err)],
    }
}

fn search_countries(conn: &Connection, query: &CountrySearch) -> Vec<Response> {
    match SqliteCountryRepository::new(conn).search_countries(query) {
        Ok(countries) => countries
            .into_iter()
            .map(Response::CountrySearchResult)
            .collect(),
        Err(err) => vec![failure(EntityKind::Country, Operation::Search, &err)],
    }
}

fn load_country(conn: &Connection, id: CountryId) -> Vec<Response> {
    match SqliteCountryRepository::new(conn).get_country(id) {
        Ok(Some(country)) => vec![Response::CountryLoaded(country)],
        Ok(None) => vec![not_found(EntityKind::Country, id)],
        Err(err) => vec![failure(EntityKind::Country, Operation::Load, &err)],
    }
}

fn save_new_country(conn: &Connection, country: &Country) -> Vec<Response> {
    match SqliteCountryRepository::new(conn).create_country(country) {
        Ok(id) => load_country(conn, id),
        Err(err) => vec![failure(EntityKind::Country, Operation::SaveNew, &err)],
    }
}

fn save_country(conn: &Connection, country: &Country) -> Vec<Response> {
    match SqliteCountryRepository::new(conn).update_country(country) {
        Ok(id) => load_country(conn, id),
        Err(err) => vec![failure(EntityKind::Country, Operation::Save, &err)],
    }
}

fn search_regions(conn: &Connection, query: &RegionSearch) -> Vec<Response> {
    match SqliteRegionRepository::new(conn).search_regions(query) {
        Ok(regions) => regions
            .into_iter()
            .map(Response::RegionSearchResult)
            .collect(),
        Err(err) => vec![failure(EntityKind::Region, Operation::Search, &err)],
    }
}

fn load_region(conn: &Connection, id: RegionId) -> Vec<Response> {
    match SqliteRegionRepository::new(conn).get_region(id) {
        Ok(Some(region)) => vec![Response::RegionLoaded(region)],
        Ok(None) => vec![not_found(EntityKind::Region, id)],
        Err(err) => vec![failure(EntityKind::Region, Operation::Load, &err)],
    }
}

fn save_new_region(conn: &Connection, region: &Region) -> Vec<Response> {
    match SqliteRegionRepository::new(conn).create_region(region) {
        Ok(id) => load_region(conn, id),
        Err(err) => vec![failure(EntityKind::Region, Operation::SaveNew, &err)],
    }
}

fn save_region(conn: &Connection, region: &Region) -> Vec<Response> {
    match SqliteRegionRepository::new(conn).update_region(region) {
        Ok(id) => load_region(conn, id),
        Err(err) => vec![failure(EntityKind::Region, Operation::Save, &err)],
    }
}
