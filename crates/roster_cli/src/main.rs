//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `roster_core` linkage by running one submit/filter/remove cycle
//!   against in-memory storage and the headless renderer.
//! - Keep output deterministic for quick local sanity checks.
//! - Route store and projector log events into a temp-dir log file.

use roster_core::{
    HeadlessRenderer, MemoryKeyValueStore, Projection, RosterConfig, RosterService, StudentInput,
};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "roster-cli-logs";

fn main() -> ExitCode {
    println!("roster_core version={}", roster_core::core_version());

    let log_dir = cli_log_dir();
    let log_dir = log_dir.to_string_lossy();
    if let Err(err) = roster_core::init_logging(roster_core::default_log_level(), &log_dir) {
        eprintln!("logging error: {err}");
        return ExitCode::FAILURE;
    }
    println!("log_dir={log_dir}");

    let (mut service, outcome) = match RosterService::open(
        MemoryKeyValueStore::new(),
        HeadlessRenderer::new(),
        RosterConfig::default(),
    ) {
        Ok(opened) => opened,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("load={outcome:?}");

    let input = StudentInput {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@x.com".to_string(),
        programme: "CS".to_string(),
        year: Some("2".to_string()),
        interests: "math, music".to_string(),
        photo_url: String::new(),
    };
    let created = match service.submit(&input) {
        Ok(outcome) => outcome.record().clone(),
        Err(err) => {
            eprintln!("submit failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("status={}", service.status().unwrap_or_default());
    println!("{}", service.count_label());
    for node in service.renderer().nodes(Projection::Table) {
        println!("row: {}", node.text);
    }

    service.set_filter("bio");
    println!("filter=bio {}", service.count_label());

    if let Err(err) = service.remove(created.id()) {
        eprintln!("remove failed: {err}");
        return ExitCode::FAILURE;
    }
    service.set_filter("");
    println!("status={}", service.status().unwrap_or_default());
    println!("{}", service.count_label());
    ExitCode::SUCCESS
}

fn cli_log_dir() -> PathBuf {
    std::env::temp_dir().join(LOG_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::cli_log_dir;

    #[test]
    fn log_dir_is_absolute_so_init_logging_accepts_it() {
        let dir = cli_log_dir();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("roster-cli-logs"));
    }
}
