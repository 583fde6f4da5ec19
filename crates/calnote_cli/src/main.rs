//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `calnote_core` linkage end to end: open a store, query, print.
//! - Keep output deterministic apart from the clock-relative counters.

use calnote_core::{
    core_version, default_log_level, init_logging, open_db, open_db_in_memory, KvNoteRepository,
    NoteService, NotesQuery, SortBy, SqliteKeyValueStore,
};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "calnote_cli")]
#[command(about = "Print a summary of a CalNote store")]
#[command(version)]
struct Cli {
    /// SQLite database file; an in-memory store is used when omitted
    db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging stays off when omitted
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("calnote_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = match cli.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let service = NoteService::new(KvNoteRepository::new(store));

    println!("calnote_core version={}", core_version());
    let stats = service.stats()?;
    println!(
        "notes total={} favorites={} this_week={} tags={}",
        stats.total_notes, stats.favorite_notes, stats.notes_this_week, stats.unique_tags
    );

    let favorites = service.query(&NotesQuery::new().favorites_only().sorted_by(SortBy::Title))?;
    for result in favorites {
        println!("* [{}] {}", result.note.id, result.note.title);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_path_and_logging_options() {
        let cli = Cli::parse_from([
            "calnote_cli",
            "notes.db",
            "--log-dir",
            "/tmp/calnote-logs",
            "--log-level",
            "warn",
        ]);
        assert_eq!(cli.db_path, Some(PathBuf::from("notes.db")));
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/calnote-logs"));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));

        let bare = Cli::parse_from(["calnote_cli"]);
        assert!(bare.db_path.is_none());
        assert!(bare.log_dir.is_none());
    }
}
