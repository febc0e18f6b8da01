//! ClientBook interactive console entry point.
//!
//! Opens the configured database, wires the repository and service, and
//! hands control to the menu loop. Startup failures exit with status 1;
//! a normal Exit (or end of input) exits with status 0.

use clap::Parser;
use clientbook_core::db::open_db;
use clientbook_core::{default_log_level, init_logging, ClientService, SqliteClientRepository};
use clientbook_cli::input::TokenReader;
use clientbook_cli::menu;
use log::info;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Console client-relationship record keeper.
#[derive(Debug, Parser)]
#[command(name = "clientbook", version, about = "Console client and phone number roster")]
struct Args {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "clientbook.db")]
    db_path: PathBuf,
    /// Directory for rolling log files. Logging stays off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log level: trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let log_dir = absolute_path(log_dir);
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("Failed to initialize logging: {err}");
            return ExitCode::FAILURE;
        }
    }

    let mut conn = match open_db(&args.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Failed to open database {}: {err}", args.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let repo = match SqliteClientRepository::try_new(&mut conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("Database is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut service = ClientService::new(repo);

    println!("Using database: {}", args.db_path.display());
    info!("event=cli_start module=cli status=ok");

    let stdin = io::stdin();
    let mut input = TokenReader::new(stdin.lock());
    let mut out = io::stdout();

    match menu::run(&mut service, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Input/output failure: {err}");
            ExitCode::FAILURE
        }
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
