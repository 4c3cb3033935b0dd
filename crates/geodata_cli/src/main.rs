//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `geodata_core` linkage with deterministic output.
//! - Optionally drive one open/search/close cycle against a database file.
//!
//! Usage: `geodata_cli [DB_PATH]`. Set `GEODATA_LOG_DIR` to an absolute
//! directory to enable file logging.

use geodata_core::{ContinentSearch, Request, RequestProcessor};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "GEODATA_LOG_DIR";

fn main() -> ExitCode {
    println!("geodata_core ping={}", geodata_core::ping());
    println!("geodata_core version={}", geodata_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level = geodata_core::default_log_level();
        if let Err(err) = geodata_core::init_logging(level.as_str(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let mut processor = RequestProcessor::new();
    let requests = [
        Request::OpenDatabase { path },
        Request::StartContinentSearch(ContinentSearch::default()),
        Request::CloseDatabase,
    ];

    let mut failed = false;
    for request in requests {
        for response in processor.process(request) {
            failed |= response.is_failure();
            println!("{response:?}");
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
