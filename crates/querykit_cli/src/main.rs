//! CLI smoke entry point.
//!
//! Seeds an in-memory database and prints persons whose name matches the
//! first argument.
//!
//! Usage: `querykit_cli [NAME] [--contains]`
//!
//! Environment:
//! - `QUERYKIT_CONFIG`: path to a JSON `QueryConfig`.
//! - `QUERYKIT_LOG_DIR`: absolute directory for file logs.

use log::info;
use querykit_core::db::open_db_in_memory;
use querykit_core::{
    default_log_level, init_logging, MatchMode, PageRequest, Person, PersonRepository,
    PersonSearch, PersonSearchService, QueryConfig, SqlitePersonRepository,
};
use std::error::Error;
use std::process::ExitCode;

const SEED: &[(&str, &str, &str)] = &[
    ("Ada", "Lovelace", "St James's Square"),
    ("Alan", "Turing", "Adlington Road"),
    ("Grace", "Hopper", "Arlington Ridge"),
    ("Adele", "Goldberg", "Page Mill Road"),
];

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("querykit_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("QUERYKIT_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }
    let config = match std::env::var("QUERYKIT_CONFIG") {
        Ok(path) => QueryConfig::from_json_file(path)?,
        Err(_) => QueryConfig::default(),
    };

    let mut name = None;
    let mut mode = MatchMode::StartsWith;
    for arg in std::env::args().skip(1) {
        if arg == "--contains" {
            mode = MatchMode::Contains;
        } else {
            name = Some(arg);
        }
    }

    let conn = open_db_in_memory()?;
    let repo = SqlitePersonRepository::with_config(&conn, config);
    for (first, last, street) in SEED {
        let mut person = Person::new(*first, *last);
        person.add_address(*street);
        repo.save(&person)?;
    }

    let service = PersonSearchService::new(repo);
    let search = PersonSearch {
        name,
        mode,
        with_addresses: true,
        ..PersonSearch::default()
    };
    let page = service.search(&search, PageRequest::first(0))?;

    info!(
        "event=cli_search module=cli status=ok rows={} total={}",
        page.number_of_elements(),
        page.total_elements
    );
    println!(
        "querykit_core version={} matches={}",
        querykit_core::core_version(),
        page.total_elements
    );
    for person in &page.content {
        let streets: Vec<&str> = person
            .addresses()
            .unwrap_or_default()
            .iter()
            .map(|address| address.street.as_str())
            .collect();
        println!(
            "{} {} {} [{}]",
            person.id.unwrap_or_default(),
            person.name,
            person.surname,
            streets.join(", ")
        );
    }
    Ok(())
}
