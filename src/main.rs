mod config;
mod db;
mod error;
mod export;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    init_logging(&config);

    let mut db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;

    match args.len() {
        1 => run::as_tui(&mut db, &config),
        _ => run::as_cli(&args, &mut db, &config),
    }
}

/// Log to a file in the data directory so the TUI is never drawn over.
/// Falls back to stderr when the file cannot be opened.
fn init_logging(config: &config::Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("pocketledger=info"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path());

    match log_file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
