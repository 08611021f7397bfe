//! `animelib` entry point.
//!
//! # Responsibility
//! - Resolve configuration for the current working directory.
//! - Start file logging, open the store and hand stdin/stdout to the session.

use animelib_core::{
    init_logging, AppConfig, SqliteAccountRepository, SqliteCatalogRepository, Session, Store,
};
use log::error;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("animelib: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let working_dir = std::env::current_dir()?;
    let config = AppConfig::load(&working_dir)?;
    init_logging(&config.log_level, &config.log_dir)?;

    let store = Store::open(&config.db_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(
        SqliteAccountRepository::new(&store),
        SqliteCatalogRepository::new(&store),
        stdin.lock(),
        stdout.lock(),
    );
    session.run()?;
    Ok(())
}
