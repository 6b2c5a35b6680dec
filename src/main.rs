mod cli;
mod config;
mod data;
mod db;
mod models;
mod prayer_times;
mod store;
mod tui;
mod utils;
mod zakat;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use data::Catalog;
use db::migrations::run_migrations;
use store::StateStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Config needs no catalog or database
    if let Some(Commands::Config { init }) = &cli.command {
        return handlers::handle_config(&config, *init);
    }

    let catalog = Catalog::load(config.data.schedule_path.as_deref())
        .context("Loading bundled data")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    let store = StateStore::new(&conn);
    let state = store.load().context("Loading saved state")?;

    match cli.command {
        Some(Commands::Times { division, date }) => {
            handlers::handle_times(&catalog, &config, &state, division.as_deref(), date.as_deref())?;
        }
        Some(Commands::Schedule { division }) => {
            handlers::handle_schedule(&catalog, &state, division.as_deref())?;
        }
        Some(Commands::Compare { from, to, date }) => {
            handlers::handle_compare(&catalog, &state, &from, &to, date.as_deref())?;
        }
        Some(Commands::Divisions) => {
            handlers::handle_divisions(&catalog, &state)?;
        }
        Some(Commands::Division { id }) => {
            handlers::handle_division(&catalog, &store, &state, &id)?;
        }
        Some(Commands::Food { action }) => {
            handlers::handle_food(&catalog, &store, &state, &action)?;
        }
        Some(Commands::Zakat(args)) => {
            handlers::handle_zakat(&config, &args)?;
        }
        Some(Commands::Settings { action }) => {
            handlers::handle_settings(&catalog, &store, &state, &action)?;
        }
        Some(Commands::Duas { search }) => {
            handlers::handle_duas(&catalog, search.as_deref())?;
        }
        Some(Commands::Names { id }) => {
            handlers::handle_names(&catalog, id)?;
        }
        Some(Commands::Tips) => {
            handlers::handle_tips(&catalog)?;
        }
        Some(Commands::Quran { chapter }) => {
            handlers::handle_quran(&catalog, chapter)?;
        }
        Some(Commands::Reset) => {
            handlers::handle_reset(&store)?;
        }
        Some(Commands::Config { .. }) => unreachable!(),

        // No subcommand → launch the dashboard
        None => {
            tui::app::run(&catalog, config, store, state)?;
        }
    }

    Ok(())
}
