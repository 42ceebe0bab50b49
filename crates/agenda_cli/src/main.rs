//! `agenda` command-line front end.
//!
//! # Responsibility
//! - Translate CLI arguments into form-session and collection commands.
//! - Resolve the database path and optional file logging.

mod commands;

use agenda_core::db::open_db;
use agenda_core::{init_logging, AgendaService, LogLevel, SqliteAgendaStore};
use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, Command};
use log::{error, info};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "agenda_store.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();
    start_logging(cli.log_dir.as_deref(), cli.log_level.as_deref())?;

    let db_path = resolve_db_path(cli.db.clone());
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open agenda store `{}`", db_path.display()))?;
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));

    let name = cli.command.name();
    let mut out = std::io::stdout().lock();
    let outcome = match cli.command {
        Command::Add(args) => commands::add(&mut service, args, &mut out).map(|_| ()),
        Command::List(args) => commands::list(&mut service, args, &mut out).map(|_| ()),
        Command::Delete(args) => commands::delete(&mut service, args, &mut out),
        Command::Export(args) => commands::export(&service, args, &mut out).map(|_| ()),
    };

    match &outcome {
        Ok(()) => info!("event=cli_command module=cli status=ok command={name}"),
        Err(err) => error!("event=cli_command module=cli status=error command={name} error={err}"),
    }
    outcome
}

fn start_logging(log_dir: Option<&Path>, level: Option<&str>) -> Result<()> {
    let Some(dir) = log_dir else {
        return Ok(());
    };
    let level = level.unwrap_or(LogLevel::build_default().as_str());
    init_logging(level, &dir.to_string_lossy()).context("failed to initialize logging")?;
    Ok(())
}

fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn db_path_defaults_to_temp_dir() {
        assert_eq!(
            resolve_db_path(None),
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        );
        assert_eq!(
            resolve_db_path(Some(PathBuf::new())),
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        );
        assert_eq!(
            resolve_db_path(Some(PathBuf::from("/data/agendas.db"))),
            PathBuf::from("/data/agendas.db")
        );
    }
}
