//! gymstats library root.
//! Exposes the attendance engine (`core`), the SQLite snapshot store (`db`),
//! the CLI parser and the high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
/// Report output stays on stdout.
pub fn init_tracing() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    // A second init (tests calling run() twice) is not an error.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let now = utils::date::resolve_now(cli.now.as_deref())?;

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg, now),
        Commands::Hours { .. } => cli::commands::hours::handle(&cli.command, cfg, now),
        Commands::Weeks { .. } => cli::commands::weeks::handle(&cli.command, cfg, now),
        Commands::Risk { .. } => cli::commands::risk::handle(&cli.command, cfg, now),
        Commands::Members => cli::commands::members::handle(&cli.command, cfg, now),
        Commands::Grid { .. } => cli::commands::grid::handle(&cli.command, cfg, now),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, now),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    // 1) parse CLI
    let cli = Cli::parse();

    // 2) load config once
    let mut cfg = Config::load()?;

    // 3) apply the command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    tracing::debug!(database = %cfg.database, test = cli.test, "configuration resolved");

    // 4) hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
