use geodata_core::db::{open_db, OpenOptions};
use geodata_core::{
    Continent, ContinentSearch, Country, CountrySearch, Region, RegionSearch, Request,
    RequestProcessor, Response,
};
use std::path::{Path, PathBuf};

#[test]
fn close_without_open_yields_nothing() {
    let mut processor = RequestProcessor::new();

    assert!(processor.process(Request::CloseDatabase).is_empty());
    assert!(!processor.is_open());
}

#[test]
fn open_then_close_reports_each_transition() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_database(dir.path(), "world.db", &[("AS", "Asia")]);
    let path_text = path.to_str().unwrap().to_string();
    let mut processor = RequestProcessor::new();

    let opened = processor.process(Request::OpenDatabase {
        path: path_text.clone(),
    });
    assert_eq!(opened, vec![Response::DatabaseOpened { path: path_text }]);
    assert!(processor.is_open());

    assert_eq!(
        processor.process(Request::CloseDatabase),
        vec![Response::DatabaseClosed]
    );
    assert!(!processor.is_open());
    assert!(processor.process(Request::CloseDatabase).is_empty());
}

#[test]
fn open_missing_file_reports_failure_and_stays_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");
    let mut processor = RequestProcessor::new();

    let responses = processor.process(Request::OpenDatabase {
        path: path.to_str().unwrap().to_string(),
    });

    assert_eq!(responses.len(), 1);
    assert!(matches!(responses[0], Response::DatabaseOpenFailed { .. }));
    assert!(!processor.is_open());
}

#[test]
fn open_empty_path_reports_failure() {
    let mut processor = RequestProcessor::new();

    let responses = processor.process(Request::OpenDatabase {
        path: String::new(),
    });

    assert_eq!(
        responses,
        vec![Response::DatabaseOpenFailed {
            message: "database path cannot be empty".to_string()
        }]
    );
}

#[test]
fn open_with_create_option_bootstraps_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    let mut processor = RequestProcessor::with_options(OpenOptions {
        create_if_missing: true,
        ..OpenOptions::default()
    });

    let responses = processor.process(Request::OpenDatabase {
        path: path.to_str().unwrap().to_string(),
    });

    assert!(matches!(responses.as_slice(), [Response::DatabaseOpened { .. }]));
    assert!(processor
        .process(Request::StartContinentSearch(ContinentSearch::default()))
        .is_empty());
}

#[test]
fn open_after_open_replaces_connection() {
    let dir = tempfile::tempdir().unwrap();
    let first = seeded_database(dir.path(), "first.db", &[("AS", "Asia")]);
    let second = seeded_database(dir.path(), "second.db", &[("EU", "Europe")]);
    let mut processor = RequestProcessor::new();

    open(&mut processor, &first);
    open(&mut processor, &second);

    assert_eq!(continent_names(&mut processor), vec!["Europe".to_string()]);
}

#[test]
fn failed_open_keeps_current_connection() {
    let dir = tempfile::tempdir().unwrap();
    let first = seeded_database(dir.path(), "first.db", &[("AS", "Asia")]);
    let mut processor = RequestProcessor::new();
    open(&mut processor, &first);

    let responses = processor.process(Request::OpenDatabase {
        path: dir.path().join("absent.db").to_str().unwrap().to_string(),
    });
    assert!(matches!(
        responses.as_slice(),
        [Response::DatabaseOpenFailed { .. }]
    ));

    assert!(processor.is_open());
    assert_eq!(continent_names(&mut processor), vec!["Asia".to_string()]);
}

#[test]
fn data_requests_without_open_database_report_no_database() {
    let mut processor = RequestProcessor::new();
    let requests = vec![
        Request::StartContinentSearch(ContinentSearch::default()),
        Request::LoadContinent { continent_id: 1 },
        Request::SaveNewContinent(Continent::new("OC", "Oceania")),
        Request::SaveContinent(Continent {
            continent_id: Some(1),
            ..Continent::new("OC", "Oceania")
        }),
        Request::StartCountrySearch(CountrySearch::default()),
        Request::LoadCountry { country_id: 1 },
        Request::SaveNewCountry(Country::new("NZ", "New Zealand", 1)),
        Request::SaveCountry(Country::new("NZ", "New Zealand", 1)),
        Request::StartRegionSearch(RegionSearch::default()),
        Request::LoadRegion { region_id: 1 },
        Request::SaveNewRegion(Region::new("NZ-AUK", "AUK", "Auckland", 1, 1)),
        Request::SaveRegion(Region::new("NZ-AUK", "AUK", "Auckland", 1, 1)),
    ];

    for request in requests {
        let kind = request.kind_name();
        assert_eq!(
            processor.process(request),
            vec![Response::NoDatabaseOpen],
            "request {kind} should report a missing database"
        );
    }
}

#[test]
fn processors_hold_independent_connections() {
    let dir = tempfile::tempdir().unwrap();
    let first = seeded_database(dir.path(), "first.db", &[("AS", "Asia")]);
    let second = seeded_database(dir.path(), "second.db", &[("EU", "Europe")]);
    let mut left = RequestProcessor::new();
    let mut right = RequestProcessor::new();

    open(&mut left, &first);
    open(&mut right, &second);

    assert_eq!(continent_names(&mut left), vec!["Asia".to_string()]);
    assert_eq!(continent_names(&mut right), vec!["Europe".to_string()]);
}

fn seeded_database(dir: &Path, file_name: &str, continents: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(file_name);
    let options = OpenOptions {
        create_if_missing: true,
        ..OpenOptions::default()
    };
    let conn = open_db(&path, &options).unwrap();
    for (code, name) in continents {
        conn.execute(
            "INSERT INTO continents (continent_code, name) VALUES (?1, ?2);",
            [*code, *name],
        )
        .unwrap();
    }
    path
}

fn open(processor: &mut RequestProcessor, path: &Path) {
    let responses = processor.process(Request::OpenDatabase {
        path: path.to_str().unwrap().to_string(),
    });
    assert!(
        matches!(responses.as_slice(), [Response::DatabaseOpened { .. }]),
        "unexpected open responses: {responses:?}"
    );
}

fn continent_names(processor: &mut RequestProcessor) -> Vec<String> {
    processor
        .process(Request::StartContinentSearch(ContinentSearch::default()))
        .into_iter()
        .map(|response| match response {
            Response::ContinentSearchResult(continent) => continent.name,
            other => panic!("unexpected response: {other:?}"),
        })
        .collect()
}
